// Adapters layer: concrete implementations of the domain ports.

pub mod admin_graphql;

pub use admin_graphql::GraphqlAdminClient;
