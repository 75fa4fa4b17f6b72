pub mod db;
pub mod oidc;
pub mod password;
