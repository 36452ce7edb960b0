//! Per-protocol dispatch.

use tracing::debug;
use vref_types::{ContentLocator, Protocol, Reference};

use crate::error::{ResolveError, ResolveResult};

/// An operation with one implementation per protocol.
///
/// [`execute`] picks the implementation from the reference's protocol.
/// Vanilla references are virtual references with an extra template, so
/// `execute_vanilla` defaults to the virtual behaviour.
pub trait ProtocolMethod {
    type Output;

    /// `locator` is the node reference's own locator.
    fn execute_node(
        &self,
        reference: &Reference,
        locator: &ContentLocator,
    ) -> ResolveResult<Self::Output>;

    fn execute_virtual(&self, reference: &Reference) -> ResolveResult<Self::Output>;

    fn execute_vanilla(&self, reference: &Reference) -> ResolveResult<Self::Output> {
        self.execute_virtual(reference)
    }
}

/// Run `method` on `reference`.
pub fn execute<M>(method: &M, reference: &Reference) -> ResolveResult<M::Output>
where
    M: ProtocolMethod + ?Sized,
{
    debug!(protocol = %reference.protocol(), "dispatching protocol method");
    match reference.protocol() {
        Protocol::Node => {
            let locator = reference.locator().ok_or_else(|| ResolveError::NotRepository {
                resource: reference.resource().to_string(),
            })?;
            method.execute_node(reference, locator)
        }
        Protocol::Virtual => method.execute_virtual(reference),
        Protocol::Vanilla => method.execute_vanilla(reference),
    }
}
