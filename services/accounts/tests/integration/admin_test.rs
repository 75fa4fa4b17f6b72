use uuid::Uuid;

use warden_accounts::domain::types::{Account, ExternalLogin};
use warden_accounts::error::AccountsError;
use warden_accounts::usecase::admin::{
    CreateAccountInput, CreateAccountUseCase, DeleteAccountUseCase, GetAccountForEditUseCase,
    ListAccountsUseCase, UpdateAccountInput, UpdateAccountUseCase,
};

use crate::helpers::{MockAccountStore, MockRoleRegistry, fields};

fn seeded(username: &str, roles: &[&str]) -> (MockAccountStore, Account) {
    let account = Account::new(fields(username, &format!("{username}@example.com")));
    let store = MockAccountStore::new().with_account(&account, Some("secret1"), roles);
    (store, account)
}

// ── List ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_accounts_with_roles() {
    let (store, admin) = seeded("admin", &["Admin"]);
    let user = Account::new(fields("bob", "bob@example.com"));
    let store = store.with_account(&user, None, &["User"]);

    let listed = ListAccountsUseCase { accounts: store }.execute().await.unwrap();

    assert_eq!(listed.len(), 2);
    let admin_row = listed.iter().find(|a| a.account.id == admin.id).unwrap();
    assert_eq!(admin_row.roles, vec!["Admin".to_owned()]);
    let user_row = listed.iter().find(|a| a.account.id == user.id).unwrap();
    assert_eq!(user_row.roles, vec!["User".to_owned()]);
}

// ── Create ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_account_with_role() {
    let store = MockAccountStore::new();
    let roles = MockRoleRegistry::with_roles(&["Admin", "User"]);
    let uc = CreateAccountUseCase {
        accounts: store.clone(),
        roles,
    };

    let account = uc
        .execute(CreateAccountInput {
            fields: fields("carol", "carol@example.com"),
            password: "secret1".into(),
            role: "Admin".into(),
        })
        .await
        .unwrap();

    assert_eq!(store.roles_for(account.id), vec!["Admin".to_owned()]);
}

#[tokio::test]
async fn should_reject_admin_create_with_duplicate_email() {
    let (store, _) = seeded("dave", &["User"]);
    let uc = CreateAccountUseCase {
        accounts: store.clone(),
        roles: MockRoleRegistry::new(),
    };

    let result = uc
        .execute(CreateAccountInput {
            fields: fields("dave2", "dave@example.com"),
            password: "secret1".into(),
            role: "User".into(),
        })
        .await;

    assert!(matches!(result, Err(AccountsError::DuplicateEmail)));
    assert_eq!(store.account_count(), 1);
}

// ── Get for edit ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_first_role_for_edit() {
    let (store, account) = seeded("erin", &["User"]);

    let out = GetAccountForEditUseCase { accounts: store }
        .execute(account.id)
        .await
        .unwrap();

    assert_eq!(out.account.username, "erin");
    assert_eq!(out.role, "User");
}

#[tokio::test]
async fn should_default_edit_role_to_user_when_none_assigned() {
    let (store, account) = seeded("frank", &[]);

    let out = GetAccountForEditUseCase { accounts: store }
        .execute(account.id)
        .await
        .unwrap();

    assert_eq!(out.role, "User");
}

#[tokio::test]
async fn should_return_not_found_for_unknown_edit_target() {
    let result = GetAccountForEditUseCase {
        accounts: MockAccountStore::new(),
    }
    .execute(Uuid::now_v7())
    .await;

    assert!(matches!(result, Err(AccountsError::NotFound)));
}

// ── Update ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_replace_user_role_with_exactly_admin() {
    let (store, account) = seeded("gina", &["User"]);
    let uc = UpdateAccountUseCase {
        accounts: store.clone(),
        roles: MockRoleRegistry::with_roles(&["User"]),
    };

    let out = uc
        .execute(UpdateAccountInput {
            id: account.id,
            fields: fields("gina", "gina@example.com"),
            role: "Admin".into(),
        })
        .await
        .unwrap();

    assert_eq!(out.roles, vec!["Admin".to_owned()]);
    assert_eq!(store.roles_for(account.id), vec!["Admin".to_owned()]);
}

#[tokio::test]
async fn should_keep_current_role_when_new_role_cannot_be_created() {
    let (store, account) = seeded("hank", &["User"]);
    let uc = UpdateAccountUseCase {
        accounts: store.clone(),
        roles: MockRoleRegistry::failing_creates(&["User"]),
    };

    let result = uc
        .execute(UpdateAccountInput {
            id: account.id,
            fields: fields("hank", "hank@example.com"),
            role: "Auditor".into(),
        })
        .await;

    assert!(matches!(result, Err(AccountsError::Internal(_))));
    assert_eq!(store.roles_for(account.id), vec!["User".to_owned()]);
}

#[tokio::test]
async fn should_overwrite_profile_fields() {
    let (store, account) = seeded("hank", &["User"]);
    let uc = UpdateAccountUseCase {
        accounts: store.clone(),
        roles: MockRoleRegistry::new(),
    };

    let mut new_fields = fields("henry", "henry@example.com");
    new_fields.first_name = "Henry".into();
    new_fields.last_name = "Hill".into();
    new_fields.phone_number = Some("+1 555 0100".into());

    let out = uc
        .execute(UpdateAccountInput {
            id: account.id,
            fields: new_fields,
            role: "User".into(),
        })
        .await
        .unwrap();

    assert_eq!(out.account.username, "henry");
    assert_eq!(out.account.email, "henry@example.com");
    assert_eq!(out.account.first_name, "Henry");
    assert_eq!(out.account.phone_number.as_deref(), Some("+1 555 0100"));
    assert_eq!(out.account.created_at, account.created_at);
    assert!(store.account_by_email("henry@example.com").is_some());
    assert!(store.account_by_email("hank@example.com").is_none());
}

#[tokio::test]
async fn should_keep_own_email_and_username_on_update() {
    let (store, account) = seeded("ivy", &["User"]);
    let uc = UpdateAccountUseCase {
        accounts: store,
        roles: MockRoleRegistry::new(),
    };

    let result = uc
        .execute(UpdateAccountInput {
            id: account.id,
            fields: fields("IVY", "Ivy@Example.com"),
            role: "User".into(),
        })
        .await;

    assert!(result.is_ok(), "got {result:?}");
}

#[tokio::test]
async fn should_reject_update_taking_another_accounts_email() {
    let (store, jack) = seeded("jack", &["User"]);
    let kate = Account::new(fields("kate", "kate@example.com"));
    let store = store.with_account(&kate, None, &["User"]);
    let uc = UpdateAccountUseCase {
        accounts: store.clone(),
        roles: MockRoleRegistry::new(),
    };

    let result = uc
        .execute(UpdateAccountInput {
            id: jack.id,
            fields: fields("jack", "kate@example.com"),
            role: "User".into(),
        })
        .await;

    assert!(matches!(result, Err(AccountsError::DuplicateEmail)));
    assert_eq!(store.account_by_email("jack@example.com").unwrap().id, jack.id);
}

#[tokio::test]
async fn should_reject_update_taking_another_accounts_username() {
    let (store, jack) = seeded("jack", &["User"]);
    let kate = Account::new(fields("kate", "kate@example.com"));
    let store = store.with_account(&kate, None, &["User"]);
    let uc = UpdateAccountUseCase {
        accounts: store,
        roles: MockRoleRegistry::new(),
    };

    let result = uc
        .execute(UpdateAccountInput {
            id: jack.id,
            fields: fields("kate", "jack@example.com"),
            role: "User".into(),
        })
        .await;

    assert!(matches!(result, Err(AccountsError::DuplicateUsername)));
}

#[tokio::test]
async fn should_return_not_found_when_updating_unknown_account() {
    let uc = UpdateAccountUseCase {
        accounts: MockAccountStore::new(),
        roles: MockRoleRegistry::new(),
    };

    let result = uc
        .execute(UpdateAccountInput {
            id: Uuid::now_v7(),
            fields: fields("ghost", "ghost@example.com"),
            role: "User".into(),
        })
        .await;

    assert!(matches!(result, Err(AccountsError::NotFound)));
}

// ── Delete ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_delete_account_with_roles_and_links() {
    let (store, account) = seeded("liam", &["User"]);
    let store = store.with_link(ExternalLogin {
        provider: "Google".into(),
        provider_key: "sub-liam".into(),
        account_id: account.id,
        provider_display_name: None,
    });
    let uc = DeleteAccountUseCase {
        accounts: store.clone(),
    };

    uc.execute(account.id).await.unwrap();

    assert_eq!(store.account_count(), 0);
    assert!(store.roles_for(account.id).is_empty());
    assert!(store.links().is_empty());
}

#[tokio::test]
async fn should_return_not_found_on_repeated_delete() {
    let (store, account) = seeded("mia", &["User"]);
    let uc = DeleteAccountUseCase { accounts: store };

    uc.execute(account.id).await.unwrap();
    let second = uc.execute(account.id).await;
    let third = uc.execute(account.id).await;

    assert!(matches!(second, Err(AccountsError::NotFound)));
    assert!(matches!(third, Err(AccountsError::NotFound)));
}

#[tokio::test]
async fn should_return_not_found_for_never_existing_id() {
    let uc = DeleteAccountUseCase {
        accounts: MockAccountStore::new(),
    };
    let id = Uuid::now_v7();

    assert!(matches!(uc.execute(id).await, Err(AccountsError::NotFound)));
    assert!(matches!(uc.execute(id).await, Err(AccountsError::NotFound)));
}
