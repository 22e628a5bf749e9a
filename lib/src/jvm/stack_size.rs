use super::FieldType;
use crate::emit::Size;
use crate::util::Width;

/// Number of operand stack slots a value occupies
///
/// `long` and `double` are category 2 values and take two slots; `void` takes none.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum StackSize {
    Zero,
    Single,
    Double,
}

impl StackSize {
    /// Classify a (possibly `void`) type
    pub fn of(field_type: Option<&FieldType>) -> StackSize {
        match field_type.map(Width::width) {
            None | Some(0) => StackSize::Zero,
            Some(1) => StackSize::Single,
            Some(_) => StackSize::Double,
        }
    }

    /// Total number of slots taken by a sequence of types
    pub fn sum<'a>(field_types: impl IntoIterator<Item = &'a FieldType>) -> usize {
        field_types.into_iter().map(Width::width).sum()
    }

    pub const fn size(self) -> usize {
        match self {
            StackSize::Zero => 0,
            StackSize::Single => 1,
            StackSize::Double => 2,
        }
    }

    /// Size of pushing a value of this size
    pub fn to_increasing_size(self) -> Size {
        let size = self.size() as isize;
        Size::new(size, size as usize)
    }

    /// Size of popping a value of this size
    pub fn to_decreasing_size(self) -> Size {
        Size::new(-(self.size() as isize), 0)
    }

    pub fn maximum(self, other: StackSize) -> StackSize {
        std::cmp::max(self, other)
    }
}

impl Width for StackSize {
    fn width(&self) -> usize {
        self.size()
    }
}
