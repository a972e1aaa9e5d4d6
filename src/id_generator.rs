use crate::element::ElementId;

/// Hands out element ids for one scene.
///
/// Ids start at 1 and are never reused, even after the scene is cleared.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last: ElementId,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> ElementId {
        self.last += 1;
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
        assert_eq!(ids.next_id(), 3);
    }
}
