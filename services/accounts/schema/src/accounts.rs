use sea_orm::entity::prelude::*;

/// Local account. `normalized_*` columns hold the upper-cased lookup keys and
/// carry the uniqueness constraints.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub username: String,
    #[sea_orm(unique)]
    pub normalized_username: String,
    pub email: String,
    #[sea_orm(unique)]
    pub normalized_email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    /// bcrypt hash; `None` for accounts that only sign in externally.
    pub password_hash: Option<String>,
    pub email_confirmed: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::account_roles::Entity")]
    AccountRoles,
    #[sea_orm(has_many = "super::external_logins::Entity")]
    ExternalLogins,
}

impl Related<super::account_roles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountRoles.def()
    }
}

impl Related<super::external_logins::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExternalLogins.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
