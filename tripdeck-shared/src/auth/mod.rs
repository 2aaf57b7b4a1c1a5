/// Authentication utilities
///
/// Only locally-registered accounts carry credentials; federated logins
/// arrive pre-authenticated from the identity provider and store no hash.
///
/// - `password`: Argon2id hashing and verification

pub mod password;
