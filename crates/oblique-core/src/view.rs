//! Plane views: how update functions and schedulers touch cell storage.
//!
//! A stencil sweep reads one buffer while writing the other, and the
//! space-time schedulers interleave reads and writes of *both* buffers
//! across concurrently running tasks whose cell sets are kept disjoint by
//! the dependency structure. That access pattern is not expressible with
//! `&`/`&mut` slices, so this module is the crate's one unsafe seam: a
//! read-only [`PlaneView`] handed to update functions, and an engine-facing
//! [`RawPlane`] that performs per-cell raw-pointer writes.
//!
//! Both types carry the same contract: no cell may be read while another
//! thread writes it, and no cell may be written by two threads at once.
//! The schedulers uphold this structurally (see the engine crate); the
//! release/acquire edges of the task graph publish writes to readers.

use std::marker::PhantomData;

use crate::coord::{linear_rank, wrap_coord, Coord, Size};
use crate::grid::GridStore;

/// Read-only view of one buffer, passed by value into update functions.
///
/// Cell reads return by value (`T: Copy`). [`get`](PlaneView::get) takes an
/// absolute in-bounds coordinate; [`get_wrapped`](PlaneView::get_wrapped)
/// reduces each axis modulo the extent first, which is how stencil updates
/// address toroidal neighbourhoods:
///
/// ```
/// use oblique_core::{DenseGrid, PlaneView};
///
/// let grid = DenseGrid::from_cells([4], vec![10, 20, 30, 40]).unwrap();
/// let view = PlaneView::of(&grid);
/// assert_eq!(view.get([2]), 30);
/// assert_eq!(view.get_wrapped([-1]), 40);
/// ```
pub struct PlaneView<'a, T, const N: usize> {
    ptr: *const T,
    extents: Size<N>,
    _marker: PhantomData<&'a [T]>,
}

impl<T, const N: usize> Clone for PlaneView<'_, T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const N: usize> Copy for PlaneView<'_, T, N> {}

// Same sharing semantics as `&[T]`.
unsafe impl<T: Sync, const N: usize> Send for PlaneView<'_, T, N> {}
unsafe impl<T: Sync, const N: usize> Sync for PlaneView<'_, T, N> {}

impl<'a, T: Copy, const N: usize> PlaneView<'a, T, N> {
    /// View the cells of a container.
    pub fn of<C: GridStore<N, Cell = T>>(grid: &'a C) -> Self {
        Self {
            ptr: grid.cells().as_ptr(),
            extents: grid.extents(),
            _marker: PhantomData,
        }
    }

    /// Per-axis extents of the viewed buffer.
    pub fn extents(&self) -> Size<N> {
        self.extents
    }

    /// Read the cell at an absolute coordinate.
    ///
    /// The coordinate must be within the extents on every axis.
    pub fn get(&self, pos: Coord<N>) -> T {
        let rank = linear_rank(&self.extents, &pos);
        // SAFETY: `ptr` points at `cell_count(extents)` cells for the
        // lifetime `'a`, and `rank` is in bounds. Concurrent writers are
        // excluded from this cell by the scheduler's dependency structure.
        unsafe { *self.ptr.add(rank) }
    }

    /// Read the cell at a coordinate reduced modulo the extents per axis.
    pub fn get_wrapped(&self, pos: Coord<N>) -> T {
        self.get(wrap_coord(&self.extents, &pos))
    }
}

/// Writable raw handle over one buffer, shared across scheduler tasks.
///
/// `RawPlane` is `Copy` and is captured by the per-zoid task closures; the
/// cell sets written by concurrently scheduled tasks are disjoint by
/// construction, which is what makes the aliasing legal. All writes are
/// per-cell raw-pointer stores so no `&mut` reference to the buffer is ever
/// materialised while tasks run.
pub struct RawPlane<T, const N: usize> {
    ptr: *mut T,
    extents: Size<N>,
}

impl<T, const N: usize> Clone for RawPlane<T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const N: usize> Copy for RawPlane<T, N> {}

// Distributed per-cell write access; the disjointness obligation is on the
// callers of `write`.
unsafe impl<T: Send + Sync, const N: usize> Send for RawPlane<T, N> {}
unsafe impl<T: Send + Sync, const N: usize> Sync for RawPlane<T, N> {}

impl<T: Copy, const N: usize> RawPlane<T, N> {
    /// Take a raw write handle over a container's cells.
    ///
    /// The handle (and any [`PlaneView`] derived from it) is valid until
    /// the container is dropped or its storage is reallocated; the
    /// exclusive borrow is released when `new` returns.
    pub fn new<C: GridStore<N, Cell = T>>(grid: &mut C) -> Self {
        Self {
            ptr: grid.cells_mut().as_mut_ptr(),
            extents: grid.extents(),
        }
    }

    /// Per-axis extents of the underlying buffer.
    pub fn extents(&self) -> Size<N> {
        self.extents
    }

    /// Store a cell value at an absolute coordinate.
    ///
    /// # Safety
    ///
    /// No other thread may read or write this cell concurrently, and the
    /// underlying container must still be live and un-reallocated.
    pub unsafe fn write(&self, pos: Coord<N>, value: T) {
        let rank = linear_rank(&self.extents, &pos);
        // SAFETY: in-bounds per `linear_rank`; exclusivity for this cell
        // is the caller's obligation.
        unsafe { self.ptr.add(rank).write(value) }
    }

    /// Read-only view of the same buffer.
    pub fn view(&self) -> PlaneView<'_, T, N> {
        PlaneView {
            ptr: self.ptr,
            extents: self.extents,
            _marker: PhantomData,
        }
    }
}
