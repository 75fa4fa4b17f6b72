pub mod account;
pub mod admin;
pub mod external;
pub mod form;
pub mod guard;
pub mod user;

use axum::response::Redirect;
use axum_extra::extract::CookieJar;

use warden_session::SessionConfig;
use warden_session::cookie::set_session_cookie;

use crate::usecase::SignedIn;

/// Set the session cookie and send the browser to its landing area.
pub(crate) fn signed_in_response(
    jar: CookieJar,
    session: &SessionConfig,
    out: SignedIn,
) -> (CookieJar, Redirect) {
    let max_age = out.persistent.then_some(session.lifetime_secs);
    let jar = set_session_cookie(jar, out.token, max_age, &session.cookie);
    (jar, Redirect::to(out.target.path()))
}
