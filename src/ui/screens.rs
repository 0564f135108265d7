use crate::kiosk::Kiosk;
use crate::selection::RosterFilter;

/// Roster view used by the admin dashboard. Holds the visible ids only; the
/// records themselves stay in the kiosk.
#[derive(Default)]
pub(crate) struct AdminScreen {
    pub(crate) filter: RosterFilter,
    pub(crate) visible: Vec<String>,
    pub(crate) selected: usize,
}

impl AdminScreen {
    pub(crate) fn new(kiosk: &Kiosk) -> Self {
        let mut screen = Self::default();
        screen.apply_filter(kiosk);
        screen
    }

    /// Recompute the visible rows after the roster or the filter changed.
    pub(crate) fn apply_filter(&mut self, kiosk: &Kiosk) {
        self.visible = kiosk
            .filtered(&self.filter)
            .into_iter()
            .map(|record| record.id.clone())
            .collect();
        self.ensure_in_bounds();
    }

    pub(crate) fn set_query(&mut self, query: Option<String>, kiosk: &Kiosk) {
        self.filter.query = query.filter(|q| !q.trim().is_empty());
        self.apply_filter(kiosk);
    }

    pub(crate) fn toggle_unprinted_only(&mut self, kiosk: &Kiosk) -> bool {
        self.filter.unprinted_only = !self.filter.unprinted_only;
        self.apply_filter(kiosk);
        self.filter.unprinted_only
    }

    pub(crate) fn current_id(&self) -> Option<&str> {
        self.visible.get(self.selected).map(String::as_str)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.visible.is_empty() {
            return;
        }
        let last = self.visible.len() as isize - 1;
        self.selected = (self.selected as isize + offset).clamp(0, last) as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.visible.len().saturating_sub(1);
    }

    pub(crate) fn ensure_in_bounds(&mut self) {
        if self.visible.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.visible.len() {
            self.selected = self.visible.len() - 1;
        }
    }
}

/// State for an active inline roster search.
pub(crate) struct SearchState {
    pub(crate) query: String,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::classifier::classify;
    use crate::kiosk::KioskSettings;
    use crate::models::{AxisSelection, Participant};
    use crate::store::{MemorySlot, RecordStore};

    fn participant(id: &str, name: &str, printed: bool) -> Participant {
        let selection = AxisSelection::from_code("ENFJ").unwrap();
        Participant {
            id: id.to_string(),
            name: name.to_string(),
            selection,
            group: classify(&selection),
            interest: "yoga".to_string(),
            score: 2,
            link: String::new(),
            created_at: Utc::now(),
            printed,
        }
    }

    /// Kiosk whose roster is exactly `records`, in that order.
    fn kiosk_with(records: &[Participant]) -> Kiosk {
        let payload = serde_json::to_string(records).unwrap();
        let store = RecordStore::open(Box::new(MemorySlot::with_payload(payload)));
        Kiosk::new(store, KioskSettings::default())
    }

    #[test]
    fn cursor_stays_in_bounds_when_filter_shrinks() {
        let kiosk = kiosk_with(&[
            participant("1", "ANA", false),
            participant("2", "BEN", true),
            participant("3", "CY", false),
        ]);
        let mut screen = AdminScreen::new(&kiosk);
        screen.select_last();
        assert_eq!(screen.current_id(), Some("3"));

        screen.set_query(Some("ana".to_string()), &kiosk);
        assert_eq!(screen.visible, vec!["1".to_string()]);
        assert_eq!(screen.current_id(), Some("1"));
    }

    #[test]
    fn unprinted_toggle_hides_printed_rows() {
        let kiosk = kiosk_with(&[participant("1", "ANA", true), participant("2", "BEN", false)]);
        let mut screen = AdminScreen::new(&kiosk);
        assert!(screen.toggle_unprinted_only(&kiosk));
        assert_eq!(screen.visible, vec!["2".to_string()]);
        assert!(!screen.toggle_unprinted_only(&kiosk));
        assert_eq!(screen.visible.len(), 2);
    }

    #[test]
    fn blank_query_clears_the_filter() {
        let kiosk = kiosk_with(&[participant("1", "ANA", false)]);
        let mut screen = AdminScreen::new(&kiosk);
        screen.set_query(Some("   ".to_string()), &kiosk);
        assert!(screen.filter.query.is_none());
        screen.move_selection(5);
        assert_eq!(screen.selected, 0);
    }

    #[test]
    fn visible_rows_follow_roster_changes() {
        let mut kiosk = kiosk_with(&[participant("1", "ANA", false), participant("2", "BEN", false)]);
        let mut screen = AdminScreen::new(&kiosk);
        screen.select_last();

        kiosk.set_selection(["2"]);
        kiosk.bulk_delete_selected().unwrap();
        screen.apply_filter(&kiosk);
        assert_eq!(screen.visible, vec!["1".to_string()]);
        assert_eq!(screen.current_id(), Some("1"));
    }
}
