//! Defines functions for handling user authentication with cookies.

use std::{cmp::max, num::ParseIntError};

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{
    Duration, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::{Error, UserID};

pub(crate) const COOKIE_USER_ID: &str = "user_id";
pub(crate) const COOKIE_EXPIRY: &str = "expiry";
/// The default duration for which auth cookies are valid.
pub const DEFAULT_COOKIE_DURATION: Duration = Duration::minutes(15);

/// Add the auth cookies to the cookie jar, indicating that a user is logged in and authenticated.
///
/// Sets the initial expiry of the cookies to `duration` from the current time.
/// You can use [DEFAULT_COOKIE_DURATION] for the default duration.
///
/// # Errors
///
/// Returns a [time::error::Format] if the expiry time cannot be formatted.
pub fn set_auth_cookie(
    jar: PrivateCookieJar,
    user_id: UserID,
    duration: Duration,
) -> Result<PrivateCookieJar, time::error::Format> {
    let expiry = OffsetDateTime::now_utc() + duration;
    // Use format instead of to_string to avoid errors at midnight when the hour is printed as
    // a single digit when [DATE_TIME_FORMAT] expects two digits.
    let expiry_string = expiry.format(DATE_TIME_FORMAT)?;

    Ok(jar
        .add(auth_cookie(COOKIE_USER_ID, user_id.as_i64().to_string(), expiry))
        .add(auth_cookie(COOKIE_EXPIRY, expiry_string, expiry)))
}

fn auth_cookie(name: &'static str, value: String, expiry: OffsetDateTime) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .expires(expiry)
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(true)
        .build()
}

/// Set the auth cookies to an invalid value and set their max age to zero,
/// which should delete the cookies on the client side.
pub fn invalidate_auth_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    let mut user_id_cookie = auth_cookie(
        COOKIE_USER_ID,
        "deleted".to_owned(),
        OffsetDateTime::UNIX_EPOCH,
    );
    user_id_cookie.set_max_age(Duration::ZERO);

    let mut expiry_cookie = auth_cookie(
        COOKIE_EXPIRY,
        "deleted".to_owned(),
        OffsetDateTime::UNIX_EPOCH,
    );
    expiry_cookie.set_max_age(Duration::ZERO);

    jar.add(user_id_cookie).add(expiry_cookie)
}

/// Set the expiry of the auth cookies in `jar` to the latest of UTC now
/// plus `duration` and the current expiry.
///
/// # Errors
///
/// The cookie jar is not modified if an error is returned.
///
/// Returns:
/// - [Error::CookieMissing] if the auth cookie or expiry cookie are not in the cookie jar.
/// - [Error::InvalidCredentials] if the expiry cookie does not hold a valid date time, or
///   extending it by `duration` would overflow.
pub(crate) fn extend_auth_cookie_duration_if_needed(
    jar: PrivateCookieJar,
    duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    let expiry_cookie = jar.get(COOKIE_EXPIRY).ok_or(Error::CookieMissing)?;
    let current_expiry =
        extract_date_time(&expiry_cookie).map_err(|_| Error::InvalidCredentials)?;

    let new_expiry = OffsetDateTime::now_utc()
        .checked_add(duration)
        .ok_or(Error::InvalidCredentials)?;

    set_auth_cookie_expiry(jar, max(current_expiry, new_expiry))
}

/// Sets the expires field of the auth cookie and the expires field and
/// value of the expiry cookie in `jar` to `expiry`.
///
/// # Errors
///
/// If an error is returned, the cookie jar is not modified.
pub(crate) fn set_auth_cookie_expiry(
    jar: PrivateCookieJar,
    expiry: OffsetDateTime,
) -> Result<PrivateCookieJar, Error> {
    let expiry_string = expiry.format(DATE_TIME_FORMAT).map_err(|error| {
        tracing::error!("Could not format cookie expiry {expiry}: {error}");
        Error::InvalidCredentials
    })?;

    let mut auth_cookie = jar.get(COOKIE_USER_ID).ok_or(Error::CookieMissing)?;
    let mut expiry_cookie = jar.get(COOKIE_EXPIRY).ok_or(Error::CookieMissing)?;

    auth_cookie.set_expires(expiry);
    auth_cookie.set_path("/");
    expiry_cookie.set_expires(expiry);
    expiry_cookie.set_path("/");
    expiry_cookie.set_value(expiry_string);

    Ok(jar.add(auth_cookie).add(expiry_cookie))
}

/// Read the user ID from the auth cookies.
///
/// # Errors
///
/// Returns [Error::CookieMissing] if either cookie is missing and
/// [Error::InvalidCredentials] if the cookies are malformed or expired.
pub(crate) fn get_user_id_from_auth_cookie(jar: &PrivateCookieJar) -> Result<UserID, Error> {
    let user_id_cookie = jar.get(COOKIE_USER_ID).ok_or(Error::CookieMissing)?;
    let expiry_cookie = jar.get(COOKIE_EXPIRY).ok_or(Error::CookieMissing)?;

    let expiry = extract_date_time(&expiry_cookie).map_err(|_| Error::InvalidCredentials)?;
    if expiry <= OffsetDateTime::now_utc() {
        return Err(Error::InvalidCredentials);
    }

    extract_user_id(&user_id_cookie).map_err(|_| Error::InvalidCredentials)
}

/// Date time format for the cookie expiry, e.g. "2021-01-01 00:00:00.000000 +00:00:00".
const DATE_TIME_FORMAT: &[BorrowedFormatItem] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond] [offset_hour \
         sign:mandatory]:[offset_minute]:[offset_second]"
);

pub(crate) fn extract_date_time(cookie: &Cookie) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(cookie.value_trimmed(), DATE_TIME_FORMAT)
}

pub(crate) fn extract_user_id(cookie: &Cookie) -> Result<UserID, ParseIntError> {
    let id: i64 = cookie.value_trimmed().parse()?;

    Ok(UserID::new(id))
}

#[cfg(test)]
mod cookie_tests {
    use axum_extra::extract::{
        PrivateCookieJar,
        cookie::{Cookie, Key},
    };
    use sha2::{Digest, Sha512};
    use time::{Duration, OffsetDateTime, UtcOffset, macros::datetime};

    use crate::{Error, UserID};

    use super::{
        COOKIE_EXPIRY, COOKIE_USER_ID, DATE_TIME_FORMAT, DEFAULT_COOKIE_DURATION,
        extend_auth_cookie_duration_if_needed, extract_date_time, extract_user_id,
        get_user_id_from_auth_cookie, invalidate_auth_cookie, set_auth_cookie,
        set_auth_cookie_expiry,
    };

    #[test]
    fn can_extract_date_time_at_midnight() {
        let want = datetime!(2021-01-01 00:00:00).assume_offset(UtcOffset::UTC);
        let date_time_string = want.format(DATE_TIME_FORMAT).unwrap();
        let cookie = Cookie::build((COOKIE_EXPIRY, date_time_string)).build();

        let got = extract_date_time(&cookie).unwrap();

        assert_eq!(got, want, "got date time {:?}, want {:?}", got, want);
    }

    #[test]
    fn can_extract_user_id() {
        let user_id = UserID::new(1);
        let cookie = Cookie::build((COOKIE_USER_ID, user_id.as_i64().to_string())).build();

        let got = extract_user_id(&cookie).unwrap();

        assert_eq!(got, user_id);
    }

    fn get_jar() -> PrivateCookieJar {
        let hash = Sha512::digest(b"foobar");
        let key = Key::from(&hash);

        PrivateCookieJar::new(key)
    }

    /// Assert that two date times are within one second of each other.
    macro_rules! assert_date_time_close {
        ($left:expr, $right:expr) => {
            assert!(
                ($left - $right).abs() < Duration::seconds(1),
                "got date time {:?}, want {:?}",
                $left,
                $right
            );
        };
    }

    #[test]
    fn can_set_cookie() {
        let user_id = UserID::new(1);

        let jar = set_auth_cookie(get_jar(), user_id, DEFAULT_COOKIE_DURATION).unwrap();
        let user_id_cookie = jar.get(COOKIE_USER_ID).unwrap();
        let expiry_cookie = jar.get(COOKIE_EXPIRY).unwrap();

        assert_eq!(extract_user_id(&user_id_cookie).unwrap(), user_id);
        assert_date_time_close!(
            extract_date_time(&expiry_cookie).unwrap(),
            OffsetDateTime::now_utc() + Duration::minutes(15)
        );
    }

    #[test]
    fn get_user_id_from_cookie_succeeds() {
        let user_id = UserID::new(1);
        let jar = set_auth_cookie(get_jar(), user_id, DEFAULT_COOKIE_DURATION).unwrap();

        assert_eq!(get_user_id_from_auth_cookie(&jar), Ok(user_id));
    }

    #[test]
    fn get_user_id_from_empty_jar_fails() {
        assert_eq!(
            get_user_id_from_auth_cookie(&get_jar()),
            Err(Error::CookieMissing)
        );
    }

    #[test]
    fn get_user_id_from_expired_cookie_fails() {
        let jar = set_auth_cookie(get_jar(), UserID::new(1), -Duration::minutes(1)).unwrap();

        assert_eq!(
            get_user_id_from_auth_cookie(&jar),
            Err(Error::InvalidCredentials)
        );
    }

    #[test]
    fn can_set_cookie_expires() {
        let jar = set_auth_cookie(get_jar(), UserID::new(1), DEFAULT_COOKIE_DURATION).unwrap();

        let want = OffsetDateTime::now_utc() + Duration::days(10);
        let updated_jar = set_auth_cookie_expiry(jar, want).unwrap();
        let id_cookie = updated_jar.get(COOKIE_USER_ID).unwrap();
        let expiry_cookie = updated_jar.get(COOKIE_EXPIRY).unwrap();

        assert_eq!(id_cookie.expires_datetime().unwrap(), want);
        assert_eq!(expiry_cookie.expires_datetime().unwrap(), want);
        assert_eq!(extract_date_time(&expiry_cookie).unwrap(), want);
    }

    #[test]
    fn can_extend_cookie_duration() {
        let jar = set_auth_cookie(get_jar(), UserID::new(1), DEFAULT_COOKIE_DURATION).unwrap();
        let want = OffsetDateTime::now_utc() + Duration::minutes(30);

        let jar = extend_auth_cookie_duration_if_needed(jar, Duration::minutes(30)).unwrap();
        let got_id_cookie = jar.get(COOKIE_USER_ID).unwrap();
        let got_expiry_cookie = jar.get(COOKIE_EXPIRY).unwrap();

        assert_date_time_close!(extract_date_time(&got_expiry_cookie).unwrap(), want);
        assert_date_time_close!(got_id_cookie.expires_datetime().unwrap(), want);
    }

    #[test]
    fn cookie_duration_does_not_shrink() {
        let jar = set_auth_cookie(get_jar(), UserID::new(1), DEFAULT_COOKIE_DURATION).unwrap();
        let want = jar.get(COOKIE_USER_ID).unwrap().expires_datetime();

        let jar = extend_auth_cookie_duration_if_needed(jar, Duration::seconds(5)).unwrap();

        assert_eq!(jar.get(COOKIE_USER_ID).unwrap().expires_datetime(), want);
    }

    #[test]
    fn invalidate_auth_cookie_succeeds() {
        let jar = set_auth_cookie(get_jar(), UserID::new(1), DEFAULT_COOKIE_DURATION).unwrap();

        let jar = invalidate_auth_cookie(jar);
        let cookie = jar.get(COOKIE_USER_ID).unwrap();

        assert_eq!(cookie.value(), "deleted");
        assert_eq!(cookie.expires_datetime(), Some(OffsetDateTime::UNIX_EPOCH));
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert_eq!(
            get_user_id_from_auth_cookie(&jar),
            Err(Error::InvalidCredentials)
        );
    }
}
