use std::io;

use console::Term;
use survey::SurfaceProvider;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Stream {
    #[default]
    Stderr,
    Stdout,
}

/// Hands out the process terminal as the prompt surface.
///
/// Acquisition fails with [`io::ErrorKind::Unsupported`] when the chosen
/// stream is not attached to a terminal, so a piped or redirected run stops
/// before any question is asked instead of hanging on input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TermProvider {
    stream: Stream,
}

impl TermProvider {
    /// Prompt on standard error; keeps stdout free for program output.
    pub fn stderr() -> Self {
        Self {
            stream: Stream::Stderr,
        }
    }

    /// Prompt on standard output. Pair with `TemplateRenderer::for_stdout` so
    /// error banners detect color support on the same stream.
    pub fn stdout() -> Self {
        Self {
            stream: Stream::Stdout,
        }
    }

    fn term(&self) -> Term {
        match self.stream {
            Stream::Stderr => Term::stderr(),
            Stream::Stdout => Term::stdout(),
        }
    }
}

impl SurfaceProvider for TermProvider {
    type Surface = Term;

    fn acquire(&self) -> io::Result<Term> {
        let term = self.term();
        if !term.is_term() {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "not an interactive terminal",
            ));
        }
        Ok(term)
    }
}

#[cfg(test)]
mod tests {
    use console::TermTarget;

    use super::*;

    #[test]
    fn defaults_to_stderr() {
        assert_eq!(TermProvider::default(), TermProvider::stderr());
        assert_ne!(TermProvider::stdout(), TermProvider::stderr());
    }

    fn acquire_matching_tty_state(provider: TermProvider, term: Term) -> Option<Term> {
        let is_tty = term.is_term();
        match provider.acquire() {
            Ok(acquired) => {
                assert!(is_tty);
                Some(acquired)
            }
            Err(e) => {
                assert!(!is_tty);
                assert_eq!(e.kind(), io::ErrorKind::Unsupported);
                None
            }
        }
    }

    #[test]
    fn stderr_acquire_matches_tty_state() {
        if let Some(term) = acquire_matching_tty_state(TermProvider::stderr(), Term::stderr()) {
            assert!(matches!(term.target(), TermTarget::Stderr));
        }
    }

    #[test]
    fn stdout_acquire_matches_tty_state() {
        if let Some(term) = acquire_matching_tty_state(TermProvider::stdout(), Term::stdout()) {
            assert!(matches!(term.target(), TermTarget::Stdout));
        }
    }
}
