//! # Session Service
//!
//! Server-side record of which wallet each visitor has connected, and the
//! pending sign-in challenges. An address is only linked once the wallet has
//! signed the visitor's challenge; the page then reads it through a read-only
//! [`SessionSnapshot`].
//!
//! Sessions idle for longer than the TTL, and challenges older than
//! [`CHALLENGE_TTL`], are swept whenever a new one is created.

use lib_core::{sign_in_message, verify_personal_sign, AppError, Result, SessionSnapshot};
use lib_utils::validate_evm_address;
use parking_lot::RwLock;
use shared::dto::drop::ChallengeResponse;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// How long a sign-in challenge can be answered.
pub const CHALLENGE_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug)]
struct Session {
    address: String,
    last_seen: Instant,
}

#[derive(Debug)]
struct Challenge {
    value: String,
    issued_at: Instant,
}

#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
    challenges: RwLock<HashMap<Uuid, Challenge>>,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            challenges: RwLock::new(HashMap::new()),
            idle_ttl,
        }
    }

    /// Issue a fresh challenge for the visitor, replacing any pending one.
    pub fn issue_challenge(&self, visitor: Uuid) -> ChallengeResponse {
        let now = Instant::now();
        let value = Uuid::new_v4().to_string();

        let mut challenges = self.challenges.write();
        challenges.retain(|_, c| now.duration_since(c.issued_at) <= CHALLENGE_TTL);
        challenges.insert(
            visitor,
            Challenge {
                value: value.clone(),
                issued_at: now,
            },
        );
        debug!("[SESSION] Challenge issued for visitor {}", visitor);

        ChallengeResponse {
            message: sign_in_message(&value),
            challenge: value,
        }
    }

    /// Link `address` to the visitor once `signature` proves the wallet signed
    /// the visitor's pending challenge. The challenge is spent either way.
    ///
    /// # Errors
    ///
    /// - `AppError::InvalidInput` if the address or signature is malformed
    /// - `AppError::Unauthorized` if there is no matching live challenge or the
    ///   signature was made by another account
    pub fn connect(&self, visitor: Uuid, address: &str, challenge: &str, signature: &str) -> Result<SessionSnapshot> {
        let address = address.trim();
        validate_evm_address(address).map_err(|e| {
            warn!("[SESSION] Rejected connect for visitor {}: {}", visitor, e);
            AppError::InvalidInput(e)
        })?;

        let pending = self.challenges.write().remove(&visitor);
        let challenge = match pending {
            Some(c) if c.value == challenge && c.issued_at.elapsed() <= CHALLENGE_TTL => c.value,
            _ => {
                warn!("[SESSION] No live challenge {:?} for visitor {}", challenge, visitor);
                return Err(AppError::Unauthorized(
                    "Sign-in challenge expired, request a new one".to_string(),
                ));
            }
        };

        verify_personal_sign(address, &sign_in_message(&challenge), signature)?;

        let now = Instant::now();
        let mut sessions = self.sessions.write();
        sessions.retain(|_, s| now.duration_since(s.last_seen) <= self.idle_ttl);
        sessions.insert(
            visitor,
            Session {
                address: address.to_string(),
                last_seen: now,
            },
        );
        info!("[SESSION] Visitor {} connected {}", visitor, address);
        Ok(SessionSnapshot::connected(address))
    }

    pub fn disconnect(&self, visitor: Uuid) {
        if let Some(session) = self.sessions.write().remove(&visitor) {
            info!("[SESSION] Visitor {} disconnected {}", visitor, session.address);
        }
    }

    /// The visitor's session, refreshing its idle timer. An expired session
    /// reads as disconnected and is dropped.
    pub fn snapshot(&self, visitor: Uuid) -> SessionSnapshot {
        let now = Instant::now();
        let mut sessions = self.sessions.write();

        match sessions.get_mut(&visitor) {
            Some(session) if now.duration_since(session.last_seen) <= self.idle_ttl => {
                session.last_seen = now;
                SessionSnapshot::connected(session.address.clone())
            }
            Some(_) => {
                sessions.remove(&visitor);
                debug!("[SESSION] Session of visitor {} expired", visitor);
                SessionSnapshot::disconnected()
            }
            None => SessionSnapshot::disconnected(),
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn pending_challenges(&self) -> usize {
        self.challenges.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::testing::TestWallet;
    use lib_core::WalletSession;

    fn store() -> SessionStore {
        SessionStore::new(Duration::from_secs(60))
    }

    #[test]
    fn test_signed_challenge_connects_then_disconnects() {
        let store = store();
        let wallet = TestWallet::new(0x11);
        let visitor = Uuid::new_v4();
        assert!(!store.snapshot(visitor).is_connected());

        let issued = store.issue_challenge(visitor);
        let signature = wallet.sign(&issued.message);
        store
            .connect(visitor, &wallet.address(), &issued.challenge, &signature)
            .unwrap();

        assert_eq!(store.snapshot(visitor).address(), Some(wallet.address()));
        assert!(!store.snapshot(Uuid::new_v4()).is_connected());

        store.disconnect(visitor);
        assert!(!store.snapshot(visitor).is_connected());
    }

    #[test]
    fn test_connect_rejects_bad_address() {
        let store = store();
        let visitor = Uuid::new_v4();
        let issued = store.issue_challenge(visitor);

        let err = store
            .connect(visitor, "not-a-wallet", &issued.challenge, "0x00")
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(!store.snapshot(visitor).is_connected());
    }

    #[test]
    fn test_connect_without_challenge_is_unauthorized() {
        let store = store();
        let wallet = TestWallet::new(0x11);
        let visitor = Uuid::new_v4();
        let signature = wallet.sign(&sign_in_message("made-up"));

        let err = store
            .connect(visitor, &wallet.address(), "made-up", &signature)
            .unwrap_err();

        assert!(matches!(err, AppError::Unauthorized(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_signature_from_other_wallet_is_unauthorized() {
        let store = store();
        let victim = TestWallet::new(0x11);
        let attacker = TestWallet::new(0x22);
        let visitor = Uuid::new_v4();
        let issued = store.issue_challenge(visitor);

        let err = store
            .connect(visitor, &victim.address(), &issued.challenge, &attacker.sign(&issued.message))
            .unwrap_err();

        assert!(matches!(err, AppError::Unauthorized(_)));
        assert!(!store.snapshot(visitor).is_connected());
    }

    #[test]
    fn test_challenge_is_single_use() {
        let store = store();
        let wallet = TestWallet::new(0x11);
        let visitor = Uuid::new_v4();
        let issued = store.issue_challenge(visitor);
        let signature = wallet.sign(&issued.message);

        store
            .connect(visitor, &wallet.address(), &issued.challenge, &signature)
            .unwrap();
        store.disconnect(visitor);

        let replay = store.connect(visitor, &wallet.address(), &issued.challenge, &signature);
        assert!(matches!(replay, Err(AppError::Unauthorized(_))));
        assert_eq!(store.pending_challenges(), 0);
    }

    #[test]
    fn test_challenge_belongs_to_its_visitor() {
        let store = store();
        let wallet = TestWallet::new(0x11);
        let issued = store.issue_challenge(Uuid::new_v4());
        let signature = wallet.sign(&issued.message);

        let err = store
            .connect(Uuid::new_v4(), &wallet.address(), &issued.challenge, &signature)
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_idle_sessions_expire_and_are_swept() {
        let store = SessionStore::new(Duration::from_millis(10));
        let wallet = TestWallet::new(0x11);
        let idle = Uuid::new_v4();
        wallet.connect(&store, idle);

        std::thread::sleep(Duration::from_millis(30));
        // Another sign-in sweeps the idle one.
        wallet.connect(&store, Uuid::new_v4());

        assert_eq!(store.len(), 1);
        assert!(!store.snapshot(idle).is_connected());
    }
}
