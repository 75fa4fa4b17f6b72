use uuid::Uuid;

use warden_accounts::domain::types::Account;
use warden_accounts::error::AccountsError;
use warden_accounts::usecase::admin::{
    DeleteAccountUseCase, UpdateAccountInput, UpdateAccountUseCase,
};
use warden_accounts::usecase::session::AuthorizeSessionUseCase;
use warden_domain::role::{ADMIN_ROLE, USER_ROLE};
use warden_session::identity::SessionIdentity;

use crate::helpers::{MockAccountStore, MockRoleRegistry, fields};

const ADMIN_ONLY: &[&str] = &[ADMIN_ROLE];
const MEMBERS: &[&str] = &[USER_ROLE, ADMIN_ROLE];

/// Identity as it was frozen into the token at sign-in.
fn signed_in_as(account: &Account, roles: &[&str]) -> SessionIdentity {
    SessionIdentity {
        account_id: account.id,
        username: account.username.clone(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
    }
}

#[tokio::test]
async fn should_admit_current_admin_with_store_roles() {
    let admin = Account::new(fields("admin", "admin@example.com"));
    let store = MockAccountStore::new().with_account(&admin, Some("secret1"), &["Admin"]);
    let uc = AuthorizeSessionUseCase { accounts: store };

    let identity = uc
        .execute(signed_in_as(&admin, &["Admin"]), ADMIN_ONLY)
        .await
        .unwrap();

    assert_eq!(identity.account_id, admin.id);
    assert_eq!(identity.roles, vec!["Admin".to_owned()]);
}

#[tokio::test]
async fn should_refuse_admin_demoted_after_sign_in() {
    let admin = Account::new(fields("boss", "boss@example.com"));
    let store = MockAccountStore::new().with_account(&admin, Some("secret1"), &["Admin"]);
    let session = signed_in_as(&admin, &["Admin"]);

    UpdateAccountUseCase {
        accounts: store.clone(),
        roles: MockRoleRegistry::with_roles(&["Admin", "User"]),
    }
    .execute(UpdateAccountInput {
        id: admin.id,
        fields: fields("boss", "boss@example.com"),
        role: "User".into(),
    })
    .await
    .unwrap();

    let uc = AuthorizeSessionUseCase { accounts: store };
    let result = uc.execute(session.clone(), ADMIN_ONLY).await;
    assert!(matches!(result, Err(AccountsError::Forbidden)));

    // Still a member, now with the demoted role.
    let identity = uc.execute(session, MEMBERS).await.unwrap();
    assert_eq!(identity.roles, vec!["User".to_owned()]);
}

#[tokio::test]
async fn should_refuse_session_of_deleted_account() {
    let admin = Account::new(fields("gone", "gone@example.com"));
    let store = MockAccountStore::new().with_account(&admin, Some("secret1"), &["Admin"]);
    let session = signed_in_as(&admin, &["Admin"]);

    DeleteAccountUseCase {
        accounts: store.clone(),
    }
    .execute(admin.id)
    .await
    .unwrap();

    let uc = AuthorizeSessionUseCase { accounts: store };
    let result = uc.execute(session, ADMIN_ONLY).await;
    assert!(matches!(result, Err(AccountsError::Unauthorized)));
}

#[tokio::test]
async fn should_refuse_token_for_unknown_account() {
    let uc = AuthorizeSessionUseCase {
        accounts: MockAccountStore::new(),
    };
    let session = SessionIdentity {
        account_id: Uuid::now_v7(),
        username: "admin".into(),
        roles: vec!["Admin".into()],
    };

    let result = uc.execute(session, ADMIN_ONLY).await;
    assert!(matches!(result, Err(AccountsError::Unauthorized)));
}

#[tokio::test]
async fn should_honour_promotion_without_new_sign_in() {
    let user = Account::new(fields("rising", "rising@example.com"));
    let store = MockAccountStore::new().with_account(&user, Some("secret1"), &["Admin"]);
    let uc = AuthorizeSessionUseCase { accounts: store };

    let identity = uc
        .execute(signed_in_as(&user, &["User"]), ADMIN_ONLY)
        .await
        .unwrap();
    assert_eq!(identity.roles, vec!["Admin".to_owned()]);
}

#[tokio::test]
async fn should_forbid_account_without_roles() {
    let account = Account::new(fields("nobody", "nobody@example.com"));
    let store = MockAccountStore::new().with_account(&account, Some("secret1"), &[]);
    let uc = AuthorizeSessionUseCase { accounts: store };

    let result = uc.execute(signed_in_as(&account, &["User"]), MEMBERS).await;
    assert!(matches!(result, Err(AccountsError::Forbidden)));
}
