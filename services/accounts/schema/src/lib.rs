//! sea-orm entities for the accounts service.

pub mod account_roles;
pub mod accounts;
pub mod external_logins;
pub mod roles;
