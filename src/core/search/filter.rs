//! Segment filters.
//!
//! Filters are evaluated before any text matching, so they are kept
//! to plain comparisons.

use crate::core::types::{SearchFilters, Segment};

impl SearchFilters {
    /// True when no filter is active
    pub fn is_empty(&self) -> bool {
        self.speakers.is_empty()
            && self.classification.is_none()
            && self.session_ids.is_empty()
            && self.min_seconds.is_none()
            && self.max_seconds.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }

    /// Whether `segment` passes every active filter
    pub fn accepts(&self, segment: &Segment) -> bool {
        if !self.speakers.is_empty() && !self.speakers.contains(&segment.speaker) {
            return false;
        }

        if let Some(classification) = self.classification {
            if segment.classification != classification {
                return false;
            }
        }

        if !self.session_ids.is_empty() && !self.session_ids.contains(&segment.session_id) {
            return false;
        }

        if let Some(min) = self.min_seconds {
            if segment.timestamp < min {
                return false;
            }
        }
        if let Some(max) = self.max_seconds {
            if segment.timestamp > max {
                return false;
            }
        }

        // ISO dates compare correctly as strings
        if let Some(from) = &self.date_from {
            if segment.session_date.as_str() < from.as_str() {
                return false;
            }
        }
        if let Some(to) = &self.date_to {
            if segment.session_date.as_str() > to.as_str() {
                return false;
            }
        }

        true
    }
}
