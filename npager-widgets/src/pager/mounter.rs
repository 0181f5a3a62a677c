// SPDX-License-Identifier: LGPL-3.0-only
use super::layout::PagerGeometry;
use super::viewport::VisiblePages;
use crate::page::PageSlot;
use std::collections::BTreeSet;

/// Upper bound of simultaneously mounted pages.
pub const MAX_MOUNTED: usize = 2;

/// Mounts pages on demand and unmounts them once they are no longer needed.
///
/// Scrolling only ever adds pages. Pages are removed when a settle confirms the
/// new page, or when mounting another page would exceed [MAX_MOUNTED].
#[derive(Debug, Default)]
pub(crate) struct PageMounter {
    mounted: BTreeSet<usize>,
}

impl PageMounter {
    pub(crate) fn mounted(&self) -> &BTreeSet<usize> {
        &self.mounted
    }

    pub(crate) fn is_mounted(&self, index: usize) -> bool {
        self.mounted.contains(&index)
    }

    /// Mounts every page in `required` that is not mounted yet. Returns whether anything changed.
    pub(crate) fn mount_required(
        &mut self,
        slots: &mut [PageSlot],
        required: VisiblePages,
        geometry: &PagerGeometry,
    ) -> bool {
        let mut changed = false;
        for index in required.iter() {
            if self.mounted.contains(&index) || index >= slots.len() {
                continue;
            }

            while self.mounted.len() >= MAX_MOUNTED {
                let Some(evict) = self.farthest_unrequired(index, required) else {
                    break;
                };
                self.unmount(slots, evict);
            }

            log::debug!("Pager: mounting page {}", index);
            let page = slots[index].page_mut();
            page.will_mount();
            page.set_frame(geometry.page_frame(index));
            page.did_mount();
            self.mounted.insert(index);
            changed = true;
        }
        changed
    }

    /// Unmounts every page not in `keep`. Returns whether anything changed.
    pub(crate) fn unmount_except(&mut self, slots: &mut [PageSlot], keep: VisiblePages) -> bool {
        let stale: Vec<usize> = self.mounted.iter().copied().filter(|&i| !keep.contains(i)).collect();
        for &index in &stale {
            self.unmount(slots, index);
        }
        !stale.is_empty()
    }

    /// Unmounts every page.
    pub(crate) fn unmount_all(&mut self, slots: &mut [PageSlot]) {
        self.unmount_except(slots, VisiblePages::None);
    }

    /// Reassigns frames of mounted pages after a layout change.
    pub(crate) fn relayout(&self, slots: &mut [PageSlot], geometry: &PagerGeometry) {
        for &index in &self.mounted {
            if let Some(slot) = slots.get_mut(index) {
                slot.page_mut().set_frame(geometry.page_frame(index));
            }
        }
    }

    /// Forgets all pages without calling them. Only valid once the pages themselves are gone.
    pub(crate) fn clear(&mut self) {
        self.mounted.clear();
    }

    fn unmount(&mut self, slots: &mut [PageSlot], index: usize) {
        if !self.mounted.remove(&index) {
            return;
        }
        log::debug!("Pager: unmounting page {}", index);
        if let Some(slot) = slots.get_mut(index) {
            let page = slot.page_mut();
            page.will_unmount();
            page.did_unmount();
        }
    }

    fn farthest_unrequired(&self, target: usize, required: VisiblePages) -> Option<usize> {
        self.mounted
            .iter()
            .copied()
            .filter(|&i| !required.contains(i))
            .max_by_key(|&i| i.abs_diff(target))
    }
}
