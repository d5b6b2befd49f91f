use axum_extra::extract::cookie::{Cookie, CookieJar};
use time::Duration;

/// Cookie holding the verified attendee email.
pub const EMAIL_COOKIE: &str = "user_email";

/// Cookie holding the attendee display name.
pub const NAME_COOKIE: &str = "user_name";

const IDENTITY_TTL_DAYS: i64 = 365;

/// The verified attendee's identity.
///
/// Written once by the entry page after a successful verification and read
/// by every later page. It is never cleared by the portal; its lifetime is
/// the cookie lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
    pub name: String,
}

/// Persist the identity into the jar. Values are URL-encoded so names with
/// spaces survive the cookie round-trip.
pub fn store(jar: CookieJar, identity: &Identity) -> CookieJar {
    jar.add(identity_cookie(EMAIL_COOKIE, &identity.email))
        .add(identity_cookie(NAME_COOKIE, &identity.name))
}

/// Read the identity back, or `None` when either cookie is absent or
/// undecodable. Callers redirect to the entry page in the `None` case.
pub fn load(jar: &CookieJar) -> Option<Identity> {
    let email = decoded(jar, EMAIL_COOKIE)?;
    let name = decoded(jar, NAME_COOKIE)?;
    Some(Identity { email, name })
}

fn identity_cookie(name: &'static str, value: &str) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, urlencoding::encode(value).into_owned());
    cookie.set_path("/");
    cookie.set_max_age(Duration::days(IDENTITY_TTL_DAYS));
    cookie
}

fn decoded(jar: &CookieJar, name: &str) -> Option<String> {
    let cookie = jar.get(name)?;
    urlencoding::decode(cookie.value())
        .ok()
        .map(|value| value.into_owned())
}
