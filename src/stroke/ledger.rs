//! The open segment slot and the completed history.

use crate::draw::{Coordinate, OpenSegment, Segment, SegmentKind};
use crate::error::InvariantViolation;
use log::debug;

/// Segments of the current drawing session.
///
/// Holds at most one open segment (only one stroke can be in progress) and the
/// ordered history of finalized segments, which is exactly what gets rendered.
#[derive(Debug, Default)]
pub struct StrokeLedger {
    open: Option<OpenSegment>,
    history: Vec<Segment>,
}

impl StrokeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new segment starting at `at`.
    ///
    /// # Errors
    /// [`InvariantViolation::SegmentAlreadyOpen`] if a segment is already open.
    pub fn open_segment(
        &mut self,
        at: Coordinate,
        kind: SegmentKind,
    ) -> Result<(), InvariantViolation> {
        if let Some(open) = &self.open {
            return Err(InvariantViolation::SegmentAlreadyOpen {
                at,
                open: open.begin,
            });
        }
        self.open = Some(OpenSegment::new(at, kind));
        Ok(())
    }

    /// The open segment, if a stroke is in progress.
    pub fn last_open_segment(&self) -> Option<&OpenSegment> {
        self.open.as_ref()
    }

    /// Closes the open segment at `end` and appends it to the history.
    ///
    /// Returns the new segment's index in the history.
    ///
    /// # Errors
    /// [`InvariantViolation::EmptyOpenStack`] if no segment is open.
    pub fn close_and_finalize(&mut self, end: Coordinate) -> Result<usize, InvariantViolation> {
        let open = self.open.take().ok_or(InvariantViolation::EmptyOpenStack)?;
        self.history.push(open.close(end));
        Ok(self.history.len() - 1)
    }

    /// Collapses the stroke ending at `terminal` into its `Begin` segment.
    ///
    /// The nearest `Begin` segment at or before `terminal` is extended to the
    /// terminal segment's end, and everything after it up to and including
    /// `terminal` is removed. Segments outside that run keep their order.
    ///
    /// # Errors
    /// - [`InvariantViolation::HistoryIndexOutOfRange`] if `terminal` is past the end
    /// - [`InvariantViolation::MissingBegin`] if no `Begin` segment precedes it
    pub fn compact_stroke(&mut self, terminal: usize) -> Result<(), InvariantViolation> {
        let len = self.history.len();
        if terminal >= len {
            return Err(InvariantViolation::HistoryIndexOutOfRange {
                index: terminal,
                len,
            });
        }

        let begin = self.history[..=terminal]
            .iter()
            .rposition(Segment::is_begin)
            .ok_or(InvariantViolation::MissingBegin { index: terminal })?;

        if begin == terminal {
            return Ok(());
        }

        let end = self.history[terminal].end;
        self.history[begin].end = end;
        self.history.drain(begin + 1..=terminal);

        debug!(
            "Compacted {} segments into {} -> {}",
            terminal - begin + 1,
            self.history[begin].begin,
            end
        );
        Ok(())
    }

    /// Finalized segments in render order.
    pub fn history(&self) -> &[Segment] {
        &self.history
    }

    /// Number of segments waiting to be finalized (0 or 1).
    pub fn open_depth(&self) -> usize {
        usize::from(self.open.is_some())
    }

    /// Drops the open segment without finalizing it.
    pub fn discard_open(&mut self) -> Option<OpenSegment> {
        self.open.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i32, y: i32) -> Coordinate {
        Coordinate::new(x, y)
    }

    /// Draws one stroke through `points` without compaction.
    fn stroke(ledger: &mut StrokeLedger, points: &[(i32, i32)]) -> usize {
        let (first, rest) = points.split_first().unwrap();
        ledger.open_segment((*first).into(), SegmentKind::Begin).unwrap();
        let mut last = 0;
        for (i, point) in rest.iter().enumerate() {
            last = ledger.close_and_finalize((*point).into()).unwrap();
            if i + 1 < rest.len() {
                ledger
                    .open_segment((*point).into(), SegmentKind::Inter)
                    .unwrap();
            }
        }
        last
    }

    #[test]
    fn new_ledger_is_empty() {
        let ledger = StrokeLedger::new();
        assert!(ledger.last_open_segment().is_none());
        assert_eq!(ledger.open_depth(), 0);
        assert!(ledger.history().is_empty());
    }

    #[test]
    fn finalize_moves_open_segment_into_history() {
        let mut ledger = StrokeLedger::new();
        ledger.open_segment(c(1, 1), SegmentKind::Begin).unwrap();
        assert_eq!(ledger.open_depth(), 1);

        let index = ledger.close_and_finalize(c(4, 5)).unwrap();

        assert_eq!(index, 0);
        assert_eq!(ledger.open_depth(), 0);
        assert_eq!(
            ledger.history(),
            &[Segment::new(c(1, 1), c(4, 5), SegmentKind::Begin)]
        );
    }

    #[test]
    fn opening_twice_is_rejected() {
        let mut ledger = StrokeLedger::new();
        ledger.open_segment(c(1, 1), SegmentKind::Begin).unwrap();

        let err = ledger.open_segment(c(2, 2), SegmentKind::Begin).unwrap_err();

        assert_eq!(
            err,
            InvariantViolation::SegmentAlreadyOpen {
                at: c(2, 2),
                open: c(1, 1)
            }
        );
        assert_eq!(ledger.last_open_segment().unwrap().begin, c(1, 1));
    }

    #[test]
    fn finalize_without_open_segment_fails() {
        let mut ledger = StrokeLedger::new();
        assert_eq!(
            ledger.close_and_finalize(c(0, 0)),
            Err(InvariantViolation::EmptyOpenStack)
        );
        assert!(ledger.history().is_empty());
    }

    #[test]
    fn compaction_collapses_run_to_single_segment() {
        let mut ledger = StrokeLedger::new();
        let terminal = stroke(&mut ledger, &[(10, 10), (20, 12), (30, 8), (50, 10)]);
        assert_eq!(ledger.history().len(), 3);

        ledger.compact_stroke(terminal).unwrap();

        assert_eq!(
            ledger.history(),
            &[Segment::new(c(10, 10), c(50, 10), SegmentKind::Begin)]
        );
    }

    #[test]
    fn compaction_of_single_segment_stroke_is_noop() {
        let mut ledger = StrokeLedger::new();
        let terminal = stroke(&mut ledger, &[(0, 0), (9, 9)]);

        ledger.compact_stroke(terminal).unwrap();

        assert_eq!(
            ledger.history(),
            &[Segment::new(c(0, 0), c(9, 9), SegmentKind::Begin)]
        );
    }

    #[test]
    fn compaction_leaves_unrelated_strokes_alone() {
        let mut ledger = StrokeLedger::new();
        stroke(&mut ledger, &[(0, 0), (1, 1), (2, 2)]);
        let straight = stroke(&mut ledger, &[(100, 0), (110, 0)]);
        ledger.compact_stroke(straight).unwrap();
        let before: Vec<Segment> = ledger.history().to_vec();

        let terminal = stroke(&mut ledger, &[(5, 50), (6, 51), (7, 52), (8, 53)]);
        ledger.compact_stroke(terminal).unwrap();

        let history = ledger.history();
        assert_eq!(&history[..before.len()], before.as_slice());
        assert_eq!(
            history[before.len()..],
            [Segment::new(c(5, 50), c(8, 53), SegmentKind::Begin)]
        );
    }

    #[test]
    fn compaction_requires_a_begin_segment() {
        let mut ledger = StrokeLedger::new();
        ledger.open_segment(c(0, 0), SegmentKind::Inter).unwrap();
        let index = ledger.close_and_finalize(c(3, 3)).unwrap();

        assert_eq!(
            ledger.compact_stroke(index),
            Err(InvariantViolation::MissingBegin { index })
        );
        assert_eq!(ledger.history().len(), 1);
    }

    #[test]
    fn compaction_rejects_out_of_range_index() {
        let mut ledger = StrokeLedger::new();
        assert_eq!(
            ledger.compact_stroke(0),
            Err(InvariantViolation::HistoryIndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn discard_drops_open_segment() {
        let mut ledger = StrokeLedger::new();
        ledger.open_segment(c(4, 4), SegmentKind::Begin).unwrap();

        let dropped = ledger.discard_open().unwrap();

        assert_eq!(dropped.begin, c(4, 4));
        assert!(ledger.last_open_segment().is_none());
        assert!(ledger.history().is_empty());
    }
}
