//! Session commands.

use laptop_market_storefront::Storefront;
use laptop_market_storefront::db::KeyValueStore;
use laptop_market_storefront::error::AppError;

pub fn login<S: KeyValueStore + ?Sized>(
    storefront: &mut Storefront<S>,
    username: &str,
    password: &str,
) -> Result<(), AppError> {
    if storefront.authenticate(username, password) {
        println!("Signed in as {username}");
        Ok(())
    } else {
        Err(AppError::Unauthorized("invalid username or password".to_string()))
    }
}

pub fn logout<S: KeyValueStore + ?Sized>(storefront: &mut Storefront<S>) {
    storefront.logout();
    println!("Signed out");
}

pub fn whoami<S: KeyValueStore + ?Sized>(storefront: &Storefront<S>) -> Result<(), AppError> {
    let user = storefront.require_user()?;
    match user.signed_in_at {
        Some(at) => println!("{} (since {})", user.username, at.format("%Y-%m-%d %H:%M UTC")),
        None => println!("{}", user.username),
    }
    Ok(())
}
