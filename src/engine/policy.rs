// Policy shapes - immediate and suspending role checks

use crate::engine::roles::SenderRoles;
use futures::future::BoxFuture;
use std::convert::Infallible;
use std::future::Future;

/// Result of applying a policy to a snapshot
///
/// `Immediate` carries the decision directly. `Pending` must be awaited;
/// the evaluator only suspends for this variant.
pub enum PolicyOutcome<E> {
    Immediate(Result<bool, E>),
    Pending(BoxFuture<'static, Result<bool, E>>),
}

impl<E> PolicyOutcome<E> {
    /// Wrap a suspending check
    pub fn pending<Fut>(fut: Fut) -> Self
    where
        Fut: Future<Output = Result<bool, E>> + Send + 'static,
    {
        PolicyOutcome::Pending(Box::pin(fut))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, PolicyOutcome::Pending(_))
    }

    /// Final decision, awaiting the check if it is still pending
    pub async fn resolve(self) -> Result<bool, E> {
        match self {
            PolicyOutcome::Immediate(result) => result,
            PolicyOutcome::Pending(fut) => fut.await,
        }
    }
}

impl<E> From<bool> for PolicyOutcome<E> {
    fn from(allowed: bool) -> Self {
        PolicyOutcome::Immediate(Ok(allowed))
    }
}

impl<E> std::fmt::Debug for PolicyOutcome<E>
where
    E: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyOutcome::Immediate(result) => f.debug_tuple("Immediate").field(result).finish(),
            PolicyOutcome::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// Caller-supplied predicate gating an action on the sender's roles
///
/// Any `Fn(&SenderRoles) -> PolicyOutcome<E>` closure is a policy. A
/// policy's error is returned to the caller of the evaluator as-is.
pub trait RoleCheckPolicy: Send + Sync {
    type Error;

    fn check(&self, roles: &SenderRoles) -> PolicyOutcome<Self::Error>;
}

impl<F, E> RoleCheckPolicy for F
where
    F: Fn(&SenderRoles) -> PolicyOutcome<E> + Send + Sync,
{
    type Error = E;

    fn check(&self, roles: &SenderRoles) -> PolicyOutcome<E> {
        self(roles)
    }
}

/// Policy from a plain boolean predicate
pub fn sync_policy<F>(predicate: F) -> impl RoleCheckPolicy<Error = Infallible>
where
    F: Fn(&SenderRoles) -> bool + Send + Sync,
{
    move |roles: &SenderRoles| -> PolicyOutcome<Infallible> {
        PolicyOutcome::Immediate(Ok(predicate(roles)))
    }
}

/// Policy from a suspending predicate
///
/// The predicate receives its own copy of the snapshot so the returned
/// future does not borrow from the evaluator.
pub fn async_policy<F, Fut, E>(predicate: F) -> impl RoleCheckPolicy<Error = E>
where
    F: Fn(SenderRoles) -> Fut + Send + Sync,
    Fut: Future<Output = Result<bool, E>> + Send + 'static,
    E: Send + 'static,
{
    move |roles: &SenderRoles| -> PolicyOutcome<E> {
        PolicyOutcome::pending(predicate(roles.clone()))
    }
}
