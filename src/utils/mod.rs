pub mod deadline;
pub mod jwt;
pub mod validate;

pub use deadline::{parse_grpc_timeout, run_with_deadline};
pub use jwt::{Claims, JwtVerifier, StaticTokenVerifier, TokenVerifier};
