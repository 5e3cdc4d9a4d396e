// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

use crate::error::StoreError;

/// Whether the cache has been re-fetched during the current load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemediationState {
    Unremediated,
    Remediated,
}

impl RemediationState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unremediated => "unremediated",
            Self::Remediated => "remediated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemediationError<E> {
    /// Remediation itself failed; fatal.
    Fetch(StoreError),
    /// The attempt failed again after remediation.
    Attempt(E),
}

impl<E: Display> Display for RemediationError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetch(e) => write!(f, "remediation failed: {e}"),
            Self::Attempt(e) => write!(f, "failed after remediation: {e}"),
        }
    }
}

impl<E> std::error::Error for RemediationError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Fetch(e) => Some(e),
            Self::Attempt(e) => Some(e),
        }
    }
}

/// Runs `attempt` in the `Unremediated` state. On its first failure,
/// `remediate` runs once with that error and `attempt` runs once more in the
/// `Remediated` state; that result is final.
pub fn run_with_remediation<T, E, A, R>(
    mut attempt: A,
    remediate: R,
) -> Result<(T, RemediationState), RemediationError<E>>
where
    A: FnMut(RemediationState) -> Result<T, E>,
    R: FnOnce(&E) -> Result<(), StoreError>,
{
    let state = RemediationState::Unremediated;
    let first = match attempt(state) {
        Ok(value) => return Ok((value, state)),
        Err(e) => e,
    };
    remediate(&first).map_err(RemediationError::Fetch)?;
    let state = RemediationState::Remediated;
    attempt(state)
        .map(|value| (value, state))
        .map_err(RemediationError::Attempt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreErrorCode;
    use std::cell::Cell;

    #[test]
    fn success_on_first_attempt_skips_remediation() {
        let remediations = Cell::new(0);
        let (value, state) = run_with_remediation(
            |_| Ok::<_, String>(7),
            |_| {
                remediations.set(remediations.get() + 1);
                Ok(())
            },
        )
        .expect("ok");
        assert_eq!((value, state), (7, RemediationState::Unremediated));
        assert_eq!(remediations.get(), 0);
    }

    #[test]
    fn first_failure_remediates_once_then_retries() {
        let attempts = Cell::new(0);
        let (value, state) = run_with_remediation(
            |state| {
                attempts.set(attempts.get() + 1);
                match state {
                    RemediationState::Unremediated => Err("corrupt".to_string()),
                    RemediationState::Remediated => Ok(1),
                }
            },
            |cause| {
                assert_eq!(cause, "corrupt");
                Ok(())
            },
        )
        .expect("healed");
        assert_eq!((value, state), (1, RemediationState::Remediated));
        assert_eq!(attempts.get(), 2);
    }

    #[test]
    fn second_failure_is_final() {
        let attempts = Cell::new(0);
        let err = run_with_remediation(
            |_| {
                attempts.set(attempts.get() + 1);
                Err::<(), _>(format!("corrupt #{}", attempts.get()))
            },
            |_| Ok(()),
        )
        .expect_err("persistent");
        assert_eq!(err, RemediationError::Attempt("corrupt #2".to_string()));
        assert_eq!(attempts.get(), 2);
    }

    #[test]
    fn remediation_failure_is_fatal_without_retry() {
        let attempts = Cell::new(0);
        let err = run_with_remediation(
            |_| {
                attempts.set(attempts.get() + 1);
                Err::<(), _>("missing".to_string())
            },
            |_| Err(StoreError::new(StoreErrorCode::Network, "offline")),
        )
        .expect_err("fatal");
        assert!(matches!(err, RemediationError::Fetch(ref e) if e.code == StoreErrorCode::Network));
        assert_eq!(attempts.get(), 1);
    }
}
