/// Authentication utilities
///
/// This module provides the authentication primitives for Taskbook:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`token`]: Opaque bearer token generation and format validation
/// - [`middleware`]: Axum middleware resolving `Authorization: Token <key>`
///   headers to the owning user
///
/// # Example
///
/// ```
/// use taskbook_shared::auth::password::{hash_password, verify_password};
/// use taskbook_shared::auth::token::generate_token_key;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let key = generate_token_key();
/// assert!(key.starts_with("tb_"));
/// # Ok(())
/// # }
/// ```

pub mod middleware;
pub mod password;
pub mod token;
