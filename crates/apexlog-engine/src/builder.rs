//! Call tree construction.
//!
//! A single left-to-right pass over the flat event stream. Open begin
//! events live on an explicit stack; each exit either closes the frame on
//! top, unwinds it in favour of an enclosing frame, or is dropped as
//! unexpected. With nothing open, every event lands on the root. Exits are
//! consumed at most once.

use apexlog_parser::{MAX_SIZE_DESCRIPTION, MAX_SIZE_REACHED, ParseSession};
use apexlog_types::{LogEvent, Nanos, Severity};
use std::iter::Peekable;
use tracing::{debug, trace};

pub const UNEXPECTED_EXIT: &str = "Unexpected-Exit";
pub const UNEXPECTED_END: &str = "Unexpected-End";

const UNEXPECTED_EXIT_DESCRIPTION: &str = "An exit event was found without a corresponding entry event e.g there is a METHOD_EXIT event without a METHOD_ENTRY";
const UNEXPECTED_END_DESCRIPTION: &str = "An entry event was found without a corresponding exit event e.g a METHOD_ENTRY event without a METHOD_EXIT";

/// What to do with the next event in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Take the event off the stream
    Consume(Action),
    /// Close the innermost frame at the given time, leaving the exit for
    /// an enclosing frame
    Unwind(Nanos),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    /// Attach to the innermost open frame (or the root)
    Attach,
    /// Close the innermost frame with this exit
    Close,
    /// Discard an exit nothing is waiting for
    Drop,
}

struct TreeBuilder<'s> {
    session: &'s mut ParseSession,
    root: LogEvent,
    stack: Vec<LogEvent>,
    /// An exception was seen inside the open frames; mismatched exits are
    /// part of the unwinding rather than errors
    discontinuity: bool,
    last_timestamp: Nanos,
}

/// Build the call tree for `events`, recording structural issues in
/// `session`. Every closed node has its duration computed; rollups and
/// package rewriting are left to the passes.
pub fn build_tree(events: Vec<LogEvent>, session: &mut ParseSession) -> LogEvent {
    let count = events.len();
    let mut builder = TreeBuilder {
        session,
        root: LogEvent::root(),
        stack: Vec::new(),
        discontinuity: false,
        last_timestamp: 0,
    };
    builder.consume(events.into_iter().peekable());
    builder.truncate_open_frames();

    let root = builder.finish_root();
    debug!(events = count, top_level = root.children.len(), "built call tree");
    root
}

impl TreeBuilder<'_> {
    fn consume(&mut self, mut events: Peekable<impl Iterator<Item = LogEvent>>) {
        while let Some(next) = events.peek() {
            let action = match self.classify(next) {
                Step::Unwind(timestamp) => {
                    self.unwind(timestamp);
                    continue;
                }
                Step::Consume(action) => action,
            };
            let Some(event) = events.next() else {
                break;
            };

            self.last_timestamp = event.timestamp;
            match action {
                Action::Attach => self.attach(event),
                Action::Close => self.close(event),
                Action::Drop => self.unexpected_exit(&event),
            }
        }
    }

    fn classify(&mut self, next: &LogEvent) -> Step {
        if next.discontinuity && !self.stack.is_empty() {
            self.discontinuity = true;
        }

        let Some((frame, enclosing)) = self.stack.split_last() else {
            return Step::Consume(Action::Attach);
        };

        if !next.is_exit() {
            Step::Consume(Action::Attach)
        } else if closes(frame, next) {
            Step::Consume(Action::Close)
        } else if self.discontinuity || enclosing.iter().any(|open| closes(open, next)) {
            Step::Unwind(next.timestamp)
        } else {
            Step::Consume(Action::Drop)
        }
    }

    fn attach(&mut self, event: LogEvent) {
        if event.opens_frame() {
            self.stack.push(event);
        } else {
            self.parent().children.push(event);
        }
    }

    fn close(&mut self, exit: LogEvent) {
        let Some(mut frame) = self.stack.pop() else {
            return;
        };
        frame.exit_stamp = Some(exit.timestamp);
        frame.finalize_with(&exit);
        self.discontinuity = false;
        self.finish_frame(frame);
    }

    fn unwind(&mut self, timestamp: Nanos) {
        let Some(mut frame) = self.stack.pop() else {
            return;
        };
        trace!(
            event_type = frame.event_type,
            timestamp = frame.timestamp,
            exit_stamp = timestamp,
            "unwinding frame"
        );
        frame.exit_stamp = Some(timestamp);
        self.finish_frame(frame);
    }

    fn unexpected_exit(&mut self, exit: &LogEvent) {
        trace!(
            event_type = exit.event_type,
            timestamp = exit.timestamp,
            "dropping unmatched exit"
        );
        self.session.record_issue(
            exit.timestamp,
            UNEXPECTED_EXIT,
            UNEXPECTED_EXIT_DESCRIPTION,
            Severity::Unexpected,
        );
    }

    /// Close whatever is still open once the stream runs out.
    fn truncate_open_frames(&mut self) {
        while let Some(mut frame) = self.stack.pop() {
            frame.exit_stamp = Some(self.last_timestamp);
            frame.is_truncated = true;

            self.session.record_issue(
                self.last_timestamp,
                UNEXPECTED_END,
                UNEXPECTED_END_DESCRIPTION,
                Severity::Unexpected,
            );
            if self.session.max_size_timestamp().is_some() {
                self.session.update_issue(
                    self.last_timestamp,
                    MAX_SIZE_REACHED,
                    MAX_SIZE_DESCRIPTION,
                    Severity::Skip,
                );
            }
            self.finish_frame(frame);
        }
    }

    fn finish_frame(&mut self, mut frame: LogEvent) {
        frame.recalculate_durations();
        self.parent().children.push(frame);
        if self.stack.is_empty() {
            self.discontinuity = false;
        }
    }

    fn parent(&mut self) -> &mut LogEvent {
        self.stack.last_mut().unwrap_or(&mut self.root)
    }

    /// The root spans its first to last top-level event.
    fn finish_root(self) -> LogEvent {
        let mut root = self.root;
        if let (Some(first), Some(last)) = (root.children.first(), root.children.last()) {
            root.timestamp = first.timestamp;
            root.exit_stamp = Some(last.end_stamp());
        }
        root.recalculate_durations();
        root
    }
}

/// Whether `exit` is the matching close of `frame`: an accepted exit
/// type and compatible line numbers.
fn closes(frame: &LogEvent, exit: &LogEvent) -> bool {
    if !frame.is_closed_by(exit.event_type) {
        return false;
    }
    match (frame.line_number, exit.line_number) {
        (Some(open), Some(close)) => open == close,
        _ => true,
    }
}
