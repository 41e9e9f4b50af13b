//! Double-buffered sweep storage.
//!
//! Every strategy reads one buffer while writing the other and swaps roles
//! each time step: even steps read the caller's grid and write the shadow,
//! odd steps the reverse. After the final step the result may sit in the
//! shadow; [`PingPong::resolve`] swaps it back so the caller's grid always
//! holds the final state.

use oblique_core::{GridStore, RawPlane, Time};

/// The caller's grid paired with an equally-shaped shadow buffer.
pub(crate) struct PingPong<'a, C, const N: usize>
where
    C: GridStore<N>,
{
    primary: &'a mut C,
    shadow: C,
}

impl<'a, C, const N: usize> PingPong<'a, C, N>
where
    C: GridStore<N>,
{
    /// Allocate a default-filled shadow next to the caller's grid.
    pub(crate) fn new(primary: &'a mut C) -> Self {
        let shadow = C::from_extents(primary.extents());
        Self { primary, shadow }
    }

    /// The `(read, write)` pair for time step `t`.
    pub(crate) fn split(&mut self, t: Time) -> (&C, &mut C) {
        if t % 2 == 0 {
            (&*self.primary, &mut self.shadow)
        } else {
            (&self.shadow, &mut *self.primary)
        }
    }

    /// Raw `(primary, shadow)` planes for the dependency-scheduled
    /// strategies.
    ///
    /// The planes stay valid until the buffers are next borrowed mutably,
    /// i.e. until [`resolve`](PingPong::resolve).
    pub(crate) fn planes(
        &mut self,
    ) -> (RawPlane<C::Cell, N>, RawPlane<C::Cell, N>) {
        (
            RawPlane::new(&mut *self.primary),
            RawPlane::new(&mut self.shadow),
        )
    }

    /// Ensure the final state is in the caller's grid.
    ///
    /// With an odd number of steps the last write landed in the shadow,
    /// so the buffers' contents are swapped.
    pub(crate) fn resolve(mut self, steps: Time) {
        if steps % 2 == 1 {
            std::mem::swap(self.primary, &mut self.shadow);
        }
    }
}
