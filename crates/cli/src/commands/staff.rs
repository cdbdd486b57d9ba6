//! Staff account management commands.

use rand::Rng;
use rand::distr::Alphanumeric;

use bakehouse_api::services::AuthService;
use bakehouse_core::StaffRole;

/// Length of generated passwords.
const GENERATED_PASSWORD_LENGTH: usize = 16;

/// Create a staff account.
///
/// When no password is given, a random one is generated and printed once;
/// it is not recoverable afterwards.
///
/// # Errors
///
/// Returns an error for an unknown role, an unreachable database, or a
/// taken username.
pub async fn create(
    username: &str,
    password: Option<&str>,
    role: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let role = role.parse::<StaffRole>()?;

    let generated = password.is_none();
    let password = password.map_or_else(generate_password, ToOwned::to_owned);

    let pool = super::connect().await?;
    let user = AuthService::new(&pool)
        .create_user(username, &password, role)
        .await?;

    tracing::info!(user_id = %user.id, role = %user.role, "staff account created");

    #[allow(clippy::print_stdout)]
    {
        println!("Created {role} account '{username}' (id {})", user.id);
        if generated {
            println!("Generated password: {password}");
            println!("Store it now; it cannot be recovered.");
        }
    }

    Ok(())
}

/// List all staff accounts.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn list() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    let users = AuthService::new(&pool).list_users().await?;

    #[allow(clippy::print_stdout)]
    {
        if users.is_empty() {
            println!("No staff accounts. Run `bakehouse seed` to create the first super-admin.");
        }
        for user in users {
            println!(
                "{:>5}  {:<24} {:<12} {}",
                user.id.get(),
                user.username,
                user.role.to_string(),
                user.created_at.format("%Y-%m-%d")
            );
        }
    }

    Ok(())
}

/// Generate a random alphanumeric password.
pub(crate) fn generate_password() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(GENERATED_PASSWORD_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_passwords_are_long_enough_and_distinct() {
        let first = generate_password();
        let second = generate_password();

        assert_eq!(first.len(), GENERATED_PASSWORD_LENGTH);
        assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(first, second);
    }
}
