//! Translates raw key events into word slot mutations and session calls.
//!
//! Handlers are persistent and gate on the session phase internally, so once
//! the session ends every further event degrades to a no-op. Nothing needs to
//! be unsubscribed when the clock runs out.

use crate::sprint::{Phase, Sprint};
use crate::surface::Surface;
use crate::words::WordSource;

/// A printable, non-space character was typed.
///
/// Spaces are word boundaries, not word content; route them to [`space`].
pub fn insert_char(sprint: &mut Sprint, c: char, surface: &mut dyn Surface) {
    debug_assert_ne!(c, ' ', "spaces are word boundaries");

    match sprint.phase {
        // The first character of the session starts the clock.
        Phase::Armed => sprint.arm_timer(),
        Phase::Running => {}
        Phase::Idle | Phase::Ended => return,
    }

    let active = sprint.active;
    let slot = &mut sprint.slots[active];
    slot.typed.push(c);
    slot.consume_preview();
    slot.refresh_correctness();

    surface.echo_char(active, c);
    surface.trim_preview(active, slot.hidden());
    surface.mark_word(active, slot.correct);
}

/// Space ends the active word, provided it has been started.
pub fn space(sprint: &mut Sprint, words: &mut dyn WordSource, surface: &mut dyn Surface) {
    if sprint.phase != Phase::Running {
        return;
    }

    let active = sprint.active;
    if sprint.slots[active].typed.is_empty() {
        // Word not yet started; wait for the next key.
        return;
    }

    // Final correctness is exact equality, not a prefix match.
    let exact = sprint.slots[active].is_exact_match();
    sprint.slots[active].correct = exact;
    surface.mark_word(active, exact);

    sprint.advance_word(words, surface);
}

/// Backspace removes the last typed character of the active word. Backing
/// up across a word boundary is unsupported.
pub fn backspace(sprint: &mut Sprint, surface: &mut dyn Surface) {
    if sprint.phase != Phase::Running {
        return;
    }

    let active = sprint.active;
    let slot = &mut sprint.slots[active];
    if slot.typed.is_empty() {
        return;
    }

    let len_before = slot.typed.chars().count();
    slot.typed.pop();
    // Restore one preview letter, unless the buffer had already run past the
    // end of the assigned word.
    if slot.hidden() > 0 && len_before <= slot.assigned_len() {
        slot.restore_preview();
    }
    slot.refresh_correctness();

    surface.truncate_typed(active, slot.typed.chars().count());
    surface.trim_preview(active, slot.hidden());
    surface.mark_word(active, slot.correct);
}
