//! Set comparisons shared by every prebuilt strategy

use crate::core::identity::ParticipantId;
use std::collections::HashSet;

/// Whether `tally` accounts for every participant
///
/// Respondents in the tally that are no longer participants (they left the
/// group after answering) are ignored, so the comparison is set-equality of
/// `tally ∩ participants` with `participants`. An empty participant set is
/// never covered: nobody answering is not agreement.
pub fn covers(tally: &HashSet<ParticipantId>, participants: &HashSet<ParticipantId>) -> bool {
    !participants.is_empty() && participants.is_subset(tally)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covers_requires_everyone() {
        let a = ParticipantId::random();
        let b = ParticipantId::random();
        let participants = HashSet::from([a, b]);

        assert!(!covers(&HashSet::from([a]), &participants));
        assert!(covers(&HashSet::from([a, b]), &participants));
    }

    #[test]
    fn test_covers_ignores_departed_respondents() {
        let a = ParticipantId::random();
        let departed = ParticipantId::random();

        assert!(covers(&HashSet::from([a, departed]), &HashSet::from([a])));
    }

    #[test]
    fn test_empty_participants_never_covered() {
        assert!(!covers(&HashSet::new(), &HashSet::new()));
        assert!(!covers(&HashSet::from([ParticipantId::random()]), &HashSet::new()));
    }
}
