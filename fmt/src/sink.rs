use core::fmt;

/// Growable text accumulator shared by both printers.
///
/// Rendering into a `Sink` is a deterministic, side-effect-free function of
/// the type and the mode flags, so repeated renders of one tree produce
/// byte-identical output (and in particular output of identical length).
/// The accumulated text never contains a NUL byte: every write goes through
/// `fmt::Write` with `str` data.
#[derive(Default)]
pub(crate) struct Sink {
    out: String,
}

impl Sink {
    pub(crate) fn new() -> Sink {
        Sink::default()
    }

    /// Writes `n` spaces.
    pub(crate) fn indent(&mut self, n: usize) -> fmt::Result {
        for _ in 0..n {
            self.out.push(' ');
        }
        Ok(())
    }

    pub(crate) fn len(&self) -> usize {
        self.out.len()
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}

impl fmt::Write for Sink {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.out.push_str(s);
        Ok(())
    }
}
