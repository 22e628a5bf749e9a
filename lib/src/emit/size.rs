use std::fmt::{Display, Error as FmtError, Formatter};
use std::iter::Sum;

/// Effect of a stack manipulation on the operand stack, in slots
///
/// The impact is the net change in stack height. The maximal size is the highest the stack got
/// above its height on entry while the manipulation ran, so it is never negative and never less
/// than the impact.
///
/// Sizes only make sense relative to the stack height when the manipulation starts, which is why
/// sequencing two manipulations requires [`Size::aggregate`] rather than adding fields.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Size {
    size_impact: isize,
    maximal_size: usize,
}

impl Size {
    /// Size of doing nothing
    pub const ZERO: Size = Size {
        size_impact: 0,
        maximal_size: 0,
    };

    pub fn new(size_impact: isize, maximal_size: usize) -> Size {
        debug_assert!(
            maximal_size as isize >= size_impact,
            "maximal size {} is below the size impact {}",
            maximal_size,
            size_impact
        );
        Size {
            size_impact,
            maximal_size,
        }
    }

    /// Net change in stack height
    pub fn size_impact(&self) -> isize {
        self.size_impact
    }

    /// Peak stack height above the entry height
    pub fn maximal_size(&self) -> usize {
        self.maximal_size
    }

    /// Size of running `self` and then `other`
    ///
    /// The second manipulation starts `self.size_impact` slots above (or below) the first one, so
    /// its peak is shifted by that much before being compared to the first peak.
    pub fn aggregate(self, other: Size) -> Size {
        let shifted_peak = (self.size_impact + other.maximal_size as isize).max(0) as usize;
        Size {
            size_impact: self.size_impact + other.size_impact,
            maximal_size: self.maximal_size.max(shifted_peak),
        }
    }
}

impl Default for Size {
    fn default() -> Self {
        Size::ZERO
    }
}

impl Sum for Size {
    fn sum<I: Iterator<Item = Size>>(iter: I) -> Size {
        iter.fold(Size::ZERO, Size::aggregate)
    }
}

impl Display for Size {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(
            f,
            "impact {:+}, maximal {}",
            self.size_impact, self.maximal_size
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn aggregate_shifts_second_peak() {
        let push_two = Size::new(2, 2);
        let push_then_pop = Size::new(-1, 1);
        assert_eq!(push_two.aggregate(push_then_pop), Size::new(1, 3));
        assert_eq!(push_then_pop.aggregate(push_two), Size::new(1, 1));
    }

    #[test]
    fn aggregate_never_negative_peak() {
        let pop_four = Size::new(-4, 0);
        let push_one = Size::new(1, 1);
        assert_eq!(pop_four.aggregate(push_one), Size::new(-3, 0));
    }

    #[test]
    fn zero_is_identity() {
        let size = Size::new(-2, 3);
        assert_eq!(Size::ZERO.aggregate(size), size);
        assert_eq!(size.aggregate(Size::ZERO), size);
    }

    #[test]
    fn associative() {
        let a = Size::new(2, 2);
        let b = Size::new(-3, 0);
        let c = Size::new(1, 4);
        assert_eq!(a.aggregate(b).aggregate(c), a.aggregate(b.aggregate(c)));
    }

    #[test]
    fn sum() {
        let sizes = vec![Size::new(1, 1), Size::new(2, 2), Size::new(-3, 0)];
        assert_eq!(sizes.into_iter().sum::<Size>(), Size::new(0, 3));
        assert_eq!(std::iter::empty::<Size>().sum::<Size>(), Size::ZERO);
    }

    #[test]
    fn display() {
        assert_eq!(Size::new(-4, 0).to_string(), "impact -4, maximal 0");
        assert_eq!(Size::new(2, 2).to_string(), "impact +2, maximal 2");
    }
}
