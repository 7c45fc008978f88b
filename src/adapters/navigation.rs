use crate::domain::ports::Navigator;
use url::Url;

/// Navigator backed by an in-process history stack.
#[derive(Debug, Clone)]
pub struct MemoryNavigator {
    history: Vec<Url>,
}

impl MemoryNavigator {
    pub fn new(start: Url) -> Self {
        Self {
            history: vec![start],
        }
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

impl Navigator for MemoryNavigator {
    fn location(&self) -> &Url {
        // never empty: `new` seeds the first entry and `replace` only swaps
        &self.history[self.history.len() - 1]
    }

    fn replace(&mut self, url: Url) {
        tracing::debug!("Replacing location with {}", url);
        match self.history.last_mut() {
            Some(current) => *current = url,
            None => self.history.push(url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_does_not_grow_history() {
        let mut nav = MemoryNavigator::new(Url::parse("http://localhost:8080/").unwrap());
        nav.replace(Url::parse("http://localhost:8080/#/abc").unwrap());

        assert_eq!(nav.history_len(), 1);
        assert_eq!(nav.location().fragment(), Some("/abc"));

        nav.replace(Url::parse("http://localhost:8080/#/def").unwrap());
        assert_eq!(nav.history_len(), 1);
        assert_eq!(nav.location().fragment(), Some("/def"));
    }
}
