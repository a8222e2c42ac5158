//! A sizer that stacks its children along one axis.

use std::num::NonZeroU32;

use figures::units::Px;
use figures::{Point, Rect, Size};
use intentional::Cast;

use crate::widget::{MakeWidget, WidgetId, WidgetInstance};
use crate::Error;

/// The axis a [`StackingSizer`] distributes space along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Children are stacked top to bottom.
    Vertical,
    /// Children are stacked left to right.
    Horizontal,
}

impl Direction {
    /// Splits a size into its primary and secondary parts.
    pub(crate) fn split_size<U>(self, s: Size<U>) -> (U, U) {
        match self {
            Direction::Vertical => (s.height, s.width),
            Direction::Horizontal => (s.width, s.height),
        }
    }

    /// Combines split values into a [`Size`].
    pub(crate) fn make_size<U>(self, primary: U, secondary: U) -> Size<U> {
        match self {
            Direction::Vertical => Size::new(secondary, primary),
            Direction::Horizontal => Size::new(primary, secondary),
        }
    }

    /// Splits a point into its primary and secondary parts.
    pub(crate) fn split_point<U>(self, p: Point<U>) -> (U, U) {
        match self {
            Direction::Vertical => (p.y, p.x),
            Direction::Horizontal => (p.x, p.y),
        }
    }

    /// Combines split values into a [`Point`].
    pub(crate) fn make_point<U>(self, primary: U, secondary: U) -> Point<U> {
        match self {
            Direction::Vertical => Point::new(secondary, primary),
            Direction::Horizontal => Point::new(primary, secondary),
        }
    }
}

/// How a child of a [`StackingSizer`] is sized along the primary axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sizing {
    /// The child receives this many shares of the space left over after
    /// fixed-size children and spacing.
    Weighted(NonZeroU32),
    /// The child is exactly this many pixels long.
    Fixed(u32),
}

impl Sizing {
    /// Returns a flexible sizing of `weight` shares.
    ///
    /// Fails with [`Error::InvalidWeight`] if `weight` is less than 1.
    pub fn weighted(weight: i32) -> crate::Result<Self> {
        u32::try_from(weight)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Sizing::Weighted)
            .ok_or(Error::InvalidWeight(weight))
    }

    /// Returns a sizing of exactly `size` pixels.
    ///
    /// Fails with [`Error::InvalidFixedSize`] if `size` is negative.
    pub fn fixed(size: i32) -> crate::Result<Self> {
        u32::try_from(size)
            .map(Sizing::Fixed)
            .map_err(|_| Error::InvalidFixedSize(size))
    }
}

impl Default for Sizing {
    fn default() -> Self {
        Self::Weighted(NonZeroU32::MIN)
    }
}

/// A child of a [`StackingSizer`] paired with its sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// The child widget.
    pub widget: WidgetId,
    /// How the child is sized along the primary axis.
    pub sizing: Sizing,
}

/// A sizer that partitions its bounds among its children along one axis.
///
/// Children are placed in insertion order, flush against each other with the
/// surface's item spacing between each adjacent pair. Every child fills the
/// sizer along the secondary axis.
///
/// Along the primary axis, [`Sizing::Fixed`] children receive exactly their
/// size. The remaining space is divided among [`Sizing::Weighted`] children
/// proportionally to their weight, and the last weighted child absorbs the
/// rounding remainder so that the children and spacing exactly cover the
/// sizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackingSizer {
    direction: Direction,
    slots: Vec<Slot>,
}

impl StackingSizer {
    /// Returns an empty sizer that stacks along `direction`.
    #[must_use]
    pub const fn new(direction: Direction) -> Self {
        Self {
            direction,
            slots: Vec::new(),
        }
    }

    /// Returns an empty sizer that stacks its children top to bottom.
    #[must_use]
    pub const fn vertical() -> Self {
        Self::new(Direction::Vertical)
    }

    /// Returns an empty sizer that stacks its children left to right.
    #[must_use]
    pub const fn horizontal() -> Self {
        Self::new(Direction::Horizontal)
    }

    /// Returns the axis this sizer stacks along.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the children and their sizing, in insertion order.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Returns the number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if this sizer has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns true if `child` is one of this sizer's children.
    #[must_use]
    pub fn contains(&self, child: WidgetId) -> bool {
        self.slots.iter().any(|slot| slot.widget == child)
    }

    /// Appends `child` with a flexible `weight`.
    ///
    /// Fails with [`Error::InvalidWeight`] if `weight` is less than 1.
    pub fn add_child(&mut self, child: WidgetId, weight: i32) -> crate::Result {
        self.push(child, Sizing::weighted(weight)?);
        Ok(())
    }

    /// Appends `child` with a fixed extent of `size` pixels along the primary
    /// axis.
    ///
    /// Fails with [`Error::InvalidFixedSize`] if `size` is negative.
    pub fn add_with_fixed_size(&mut self, child: WidgetId, size: i32) -> crate::Result {
        self.push(child, Sizing::fixed(size)?);
        Ok(())
    }

    /// Appends `child` with `sizing`.
    pub fn push(&mut self, child: WidgetId, sizing: Sizing) {
        self.slots.push(Slot {
            widget: child,
            sizing,
        });
    }

    /// Removes every occurrence of `child`, returning true if any were found.
    pub fn remove_child(&mut self, child: WidgetId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|slot| slot.widget != child);
        self.slots.len() != before
    }

    /// Computes the bounds of each child when this sizer covers `bounds` and
    /// items are separated by `spacing`.
    ///
    /// Only the primary-axis component of `spacing` is used. The result
    /// contains one entry per child, in insertion order. Degenerate inputs,
    /// such as fixed sizes that exceed `bounds` or sizers without any weighted
    /// children, never fail: extents are clamped to zero and unused space is
    /// left after the last child.
    #[must_use]
    pub fn apply(&self, bounds: Rect<Px>, spacing: Size<Px>) -> Vec<(WidgetId, Rect<Px>)> {
        if self.slots.is_empty() {
            return Vec::new();
        }

        let (primary, secondary) = self.direction.split_size(bounds.size);
        let (origin, cross_origin) = self.direction.split_point(bounds.origin);
        let gap = i64::from(self.direction.split_size(spacing).0.get().max(0));
        let secondary = Px::new(secondary.get().max(0));

        let mut fixed = 0_i64;
        let mut total_weight = 0_i64;
        let mut last_weighted = None;
        for (index, slot) in self.slots.iter().enumerate() {
            match slot.sizing {
                Sizing::Weighted(weight) => {
                    total_weight += i64::from(weight.get());
                    last_weighted = Some(index);
                }
                Sizing::Fixed(size) => fixed += i64::from(size),
            }
        }

        let gaps = gap * (self.slots.len().cast::<i64>() - 1);
        let flexible = i64::from(primary.get()) - fixed - gaps;
        let (per_weight, left_over) = if total_weight > 0 {
            let per_weight = (flexible / total_weight).max(0);
            (per_weight, flexible - per_weight * total_weight)
        } else {
            (0, 0)
        };
        tracing::trace!(
            direction = ?self.direction,
            children = self.slots.len(),
            flexible,
            per_weight,
            left_over,
            "stacking children"
        );

        let mut offset = i64::from(origin.get());
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| {
                let mut extent = match slot.sizing {
                    Sizing::Weighted(weight) => i64::from(weight.get()) * per_weight,
                    Sizing::Fixed(size) => i64::from(size),
                };
                if last_weighted == Some(index) {
                    extent += left_over;
                }
                let extent = extent.max(0);

                let rect = Rect::new(
                    self.direction.make_point(saturating_px(offset), cross_origin),
                    self.direction.make_size(saturating_px(extent), secondary),
                );
                offset += extent + gap;
                (slot.widget, rect)
            })
            .collect()
    }
}

fn saturating_px(value: i64) -> Px {
    Px::new(i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX }))
}

/// A [`StackingSizer`] that stacks its children top to bottom.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerticalSizer;

impl VerticalSizer {
    /// Returns an empty vertical sizer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl From<VerticalSizer> for StackingSizer {
    fn from(_: VerticalSizer) -> Self {
        StackingSizer::vertical()
    }
}

impl MakeWidget for VerticalSizer {
    fn make_widget(self) -> WidgetInstance {
        WidgetInstance::Sizer(self.into())
    }
}

/// A [`StackingSizer`] that stacks its children left to right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HorizontalSizer;

impl HorizontalSizer {
    /// Returns an empty horizontal sizer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl From<HorizontalSizer> for StackingSizer {
    fn from(_: HorizontalSizer) -> Self {
        StackingSizer::horizontal()
    }
}

impl MakeWidget for HorizontalSizer {
    fn make_widget(self) -> WidgetInstance {
        WidgetInstance::Sizer(self.into())
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use figures::units::Px;
    use figures::{Point, Rect, Size};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::{Direction, Sizing, StackingSizer};
    use crate::widget::{Widget, WidgetId};
    use crate::{Error, WidgetTree};

    #[derive(Debug)]
    struct Blank;

    fn weighted(weight: u32) -> Sizing {
        Sizing::Weighted(NonZeroU32::new(weight).unwrap())
    }

    impl Widget for Blank {}

    fn size(width: i32, height: i32) -> Size<Px> {
        Size::new(Px::new(width), Px::new(height))
    }

    fn at(x: i32, y: i32, size: Size<Px>) -> Rect<Px> {
        Rect::new(Point::new(Px::new(x), Px::new(y)), size)
    }

    fn sizer_with(direction: Direction, sizings: &[Sizing]) -> (StackingSizer, Vec<WidgetId>) {
        let mut tree = WidgetTree::new();
        let mut sizer = StackingSizer::new(direction);
        let ids = sizings
            .iter()
            .map(|sizing| {
                let id = tree.push(Blank);
                sizer.push(id, *sizing);
                id
            })
            .collect();
        (sizer, ids)
    }

    /// Lays out `sizings` in both directions and checks each child's extent
    /// along the primary axis, that children are packed with `spacing`
    /// between them, and that they fill the secondary axis.
    fn assert_extents(sizings: &[Sizing], primary: i32, spacing: i32, expected: &[i32]) {
        assert_eq!(sizings.len(), expected.len());
        for direction in [Direction::Vertical, Direction::Horizontal] {
            let (sizer, ids) = sizer_with(direction, sizings);
            let bounds = Rect::new(
                direction.make_point(Px::new(5), Px::new(7)),
                direction.make_size(Px::new(primary), Px::new(40)),
            );
            let layout = sizer.apply(bounds, direction.make_size(Px::new(spacing), Px::new(99)));
            assert_eq!(layout.len(), expected.len());

            let mut offset = 5;
            for (index, ((id, rect), &expected)) in layout.iter().zip(expected).enumerate() {
                assert_eq!(*id, ids[index]);
                let (extent, cross) = direction.split_size(rect.size);
                let (position, cross_position) = direction.split_point(rect.origin);
                assert_eq!(
                    extent.get(),
                    expected,
                    "{direction:?} child {index} measured to {extent:?}, expected {expected}"
                );
                assert_eq!(position.get(), offset, "{direction:?} child {index} offset");
                assert_eq!(cross.get(), 40);
                assert_eq!(cross_position.get(), 7);
                offset += expected + spacing;
            }
        }
    }

    #[test]
    fn weighted_horizontal() {
        let (sizer, ids) = sizer_with(
            Direction::Horizontal,
            &[weighted(1), weighted(2), weighted(1)],
        );
        let layout = sizer.apply(at(0, 0, size(300, 100)), size(0, 0));
        assert_eq!(
            layout,
            vec![
                (ids[0], at(0, 0, size(75, 100))),
                (ids[1], at(75, 0, size(150, 100))),
                (ids[2], at(225, 0, size(75, 100))),
            ]
        );
    }

    #[test]
    fn vertical_with_spacing() {
        let (sizer, ids) = sizer_with(
            Direction::Vertical,
            &[weighted(1), weighted(1)],
        );
        let layout = sizer.apply(at(0, 0, size(100, 301)), size(8, 1));
        assert_eq!(
            layout,
            vec![
                (ids[0], at(0, 0, size(100, 150))),
                (ids[1], at(0, 151, size(100, 150))),
            ]
        );
    }

    #[test]
    fn fixed_then_flexible() {
        assert_extents(&[Sizing::Fixed(200), weighted(1)], 500, 0, &[200, 300]);
        assert_extents(&[Sizing::Fixed(200), weighted(1)], 500, 4, &[200, 296]);
        assert_extents(
            &[weighted(1), Sizing::Fixed(7), weighted(1)],
            15,
            0,
            &[4, 7, 4],
        );
    }

    #[test]
    fn remainder_goes_to_last_weighted_child() {
        assert_extents(
            &[weighted(1), weighted(1), weighted(1)],
            10,
            0,
            &[3, 3, 4],
        );
        // The trailing fixed child is not weighted, so the middle child absorbs
        // the remainder.
        assert_extents(
            &[weighted(2), weighted(1), Sizing::Fixed(5)],
            16,
            0,
            &[6, 5, 5],
        );
        assert_extents(
            &[weighted(1), weighted(1), weighted(1)],
            13,
            2,
            &[3, 3, 3],
        );
    }

    #[test]
    fn only_fixed_children_leave_slack() {
        assert_extents(&[Sizing::Fixed(10), Sizing::Fixed(20)], 100, 3, &[10, 20]);
        assert_extents(&[Sizing::Fixed(0)], 100, 3, &[0]);
    }

    #[test]
    fn overflowing_fixed_children_clamp_flexible_children() {
        assert_extents(&[Sizing::Fixed(80), weighted(1)], 50, 0, &[80, 0]);
        assert_extents(
            &[weighted(3), Sizing::Fixed(30), weighted(1)],
            20,
            5,
            &[0, 30, 0],
        );
    }

    #[test]
    fn zero_sized_bounds() {
        assert_extents(&[weighted(1), weighted(4)], 0, 0, &[0, 0]);
        assert_extents(&[weighted(1), weighted(1)], 0, 6, &[0, 0]);

        let (sizer, _) = sizer_with(Direction::Vertical, &[weighted(1)]);
        let layout = sizer.apply(at(0, 0, size(-10, 10)), size(0, 0));
        assert_eq!(layout[0].1.size, size(0, 10));
    }

    #[test]
    fn empty_sizer_is_a_no_op() {
        let sizer = StackingSizer::horizontal();
        assert!(sizer.is_empty());
        assert!(sizer.apply(at(0, 0, size(10, 10)), size(1, 1)).is_empty());
    }

    #[test]
    fn weights_must_be_positive() {
        let mut tree = WidgetTree::new();
        let child = tree.push(Blank);
        let mut sizer = StackingSizer::vertical();
        assert_eq!(sizer.add_child(child, 0), Err(Error::InvalidWeight(0)));
        assert_eq!(sizer.add_child(child, -1), Err(Error::InvalidWeight(-1)));
        assert!(sizer.is_empty());
        assert_eq!(sizer.add_child(child, 1), Ok(()));
        assert_eq!(
            sizer.add_with_fixed_size(child, -3),
            Err(Error::InvalidFixedSize(-3))
        );
        assert_eq!(sizer.add_with_fixed_size(child, 0), Ok(()));
        assert_eq!(sizer.len(), 2);
        assert_eq!(sizer.slots()[0].sizing, weighted(1));
        assert_eq!(sizer.slots()[1].sizing, Sizing::Fixed(0));

        assert_eq!(Sizing::weighted(0), Err(Error::InvalidWeight(0)));
        assert_eq!(Sizing::weighted(3), Ok(weighted(3)));
        assert_eq!(Sizing::default(), weighted(1));
    }

    #[test]
    fn removing_a_child_removes_its_sizing() {
        let mut tree = WidgetTree::new();
        let a = tree.push(Blank);
        let b = tree.push(Blank);
        let mut sizer = StackingSizer::horizontal();
        sizer.add_with_fixed_size(a, 10).unwrap();
        sizer.add_child(b, 3).unwrap();
        assert!(sizer.remove_child(a));
        assert!(!sizer.remove_child(a));
        assert!(!sizer.contains(a));

        let layout = sizer.apply(at(0, 0, size(50, 5)), size(0, 0));
        assert_eq!(layout, vec![(b, at(0, 0, size(50, 5)))]);
    }

    #[test]
    fn leading_weighted_children_are_proportional() {
        for (first, second) in [(1, 1), (1, 2), (3, 1), (2, 5)] {
            let (sizer, _) = sizer_with(
                Direction::Horizontal,
                &[weighted(first), weighted(second)],
            );
            let total = first + second;
            for width in [0, 1, 7, 99, 640] {
                let layout = sizer.apply(at(0, 0, size(width, 1)), size(0, 0));
                let unit = width / i32::try_from(total).unwrap();
                assert_eq!(layout[0].1.size.width.get(), unit * i32::try_from(first).unwrap());
                let last = layout[1].1.size.width.get() - unit * i32::try_from(second).unwrap();
                assert!((0..i32::try_from(total).unwrap()).contains(&last));
            }
        }
    }

    #[test]
    fn random_layouts_cover_the_sizer() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..500 {
            let direction = if rng.random() {
                Direction::Vertical
            } else {
                Direction::Horizontal
            };
            let count = rng.random_range(1..8_usize);
            let mut sizings: Vec<Sizing> = (0..count)
                .map(|_| {
                    if rng.random_ratio(1, 3) {
                        Sizing::Fixed(rng.random_range(0..40))
                    } else {
                        weighted(rng.random_range(1..6))
                    }
                })
                .collect();
            // Guarantee at least one flexible child so the space is fully used.
            sizings[rng.random_range(0..count)] = weighted(rng.random_range(1..6));

            let spacing = rng.random_range(0..6);
            let fixed: i32 = sizings
                .iter()
                .map(|sizing| match sizing {
                    Sizing::Fixed(size) => i32::try_from(*size).unwrap(),
                    Sizing::Weighted(_) => 0,
                })
                .sum();
            let minimum = fixed + spacing * (i32::try_from(count).unwrap() - 1);
            let primary = minimum + rng.random_range(0..500);
            let secondary = rng.random_range(0..300);

            let (sizer, _) = sizer_with(direction, &sizings);
            let bounds = Rect::new(
                Point::new(Px::new(rng.random_range(-50..50)), Px::new(rng.random_range(-50..50))),
                direction.make_size(Px::new(primary), Px::new(secondary)),
            );
            let layout = sizer.apply(bounds, direction.make_size(Px::new(spacing), Px::new(0)));

            let (origin, cross_origin) = direction.split_point(bounds.origin);
            let mut covered = 0;
            let mut previous = origin.get();
            for ((_, rect), sizing) in layout.iter().zip(&sizings) {
                let (extent, cross) = direction.split_size(rect.size);
                let (position, cross_position) = direction.split_point(rect.origin);
                assert!(extent.get() >= 0);
                assert!(position.get() >= previous);
                assert_eq!(cross.get(), secondary);
                assert_eq!(cross_position, cross_origin);
                if let Sizing::Fixed(fixed) = sizing {
                    assert_eq!(extent.get(), i32::try_from(*fixed).unwrap());
                }
                previous = position.get() + extent.get() + spacing;
                covered += extent.get();
            }
            assert_eq!(
                covered + spacing * (i32::try_from(count).unwrap() - 1),
                primary,
                "{sizings:?} in {primary} with spacing {spacing}"
            );
        }
    }
}
