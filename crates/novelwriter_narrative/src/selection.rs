//! Winner resolution against the candidate list.

use novelwriter_core::{PitchRecord, SelectionRecord, WinnerFallback};
use tracing::warn;

/// Find the candidate the selection names.
///
/// Titles must match exactly. When none does, the first candidate wins, the
/// selection's winner is rewritten to its title and
/// [`WinnerFallback::FirstCandidate`] is recorded. Returns `None` only for an
/// empty candidate list.
pub fn resolve_winner(
    candidates: &[PitchRecord],
    selection: &mut SelectionRecord,
) -> Option<PitchRecord> {
    if let Some(pitch) = candidates
        .iter()
        .find(|pitch| pitch.title == selection.winner)
    {
        return Some(pitch.clone());
    }

    let first = candidates.first()?;
    warn!(
        named = %selection.winner,
        using = %first.title,
        fallback = %WinnerFallback::FirstCandidate,
        "Selected title matches no candidate"
    );
    selection.winner = first.title.clone();
    selection.fallback = Some(WinnerFallback::FirstCandidate);
    Some(first.clone())
}
