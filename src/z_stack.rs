use crate::constants::BASE_Z;
use crate::photo::PhotoId;

/// Paint order of the tiles on the wall. The last entry is drawn on top.
#[derive(Debug, Default, Clone)]
pub struct ZStack {
    order: Vec<PhotoId>,
}

impl ZStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stack with `ids` in source order, dropping duplicates.
    pub fn reseed<'a>(&mut self, ids: impl IntoIterator<Item = &'a PhotoId>) {
        self.order.clear();
        for id in ids {
            if !self.order.contains(id) {
                self.order.push(id.clone());
            }
        }
    }

    /// Moves `id` to the top. Ids that are not on the wall are ignored.
    pub fn bring_to_top(&mut self, id: &PhotoId) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        if index + 1 == self.order.len() {
            return;
        }
        let id = self.order.remove(index);
        self.order.push(id);
    }

    pub fn index_of(&self, id: &PhotoId) -> Option<usize> {
        self.order.iter().position(|entry| entry == id)
    }

    /// Stacking value used for rendering; strictly increasing along the stack.
    pub fn z_index(&self, id: &PhotoId) -> Option<i32> {
        self.index_of(id).map(|index| BASE_Z + index as i32)
    }

    pub fn top(&self) -> Option<&PhotoId> {
        self.order.last()
    }

    /// Bottom to top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &PhotoId> {
        self.order.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.order.clear();
    }
}
