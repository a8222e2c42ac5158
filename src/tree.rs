use ahash::AHashSet;
use alot::Lots;
use figures::units::Px;
use figures::{Point, Rect, Size};

use crate::context::DrawContext;
use crate::surface::Surface;
use crate::widget::{MakeWidget, WidgetId, WidgetInstance};
use crate::widgets::Sizing;
use crate::{Error, Name};

/// An arena that owns a collection of widgets and the relationships between
/// them.
///
/// Widgets refer to their children by [`WidgetId`]. A widget may be the child
/// of more than one parent, but never its own ancestor.
#[derive(Debug)]
pub struct WidgetTree {
    nodes: Lots<Node>,
    live: Vec<WidgetId>,
}

#[derive(Debug)]
struct Node {
    name: Name,
    rect: Rect<Px>,
    instance: WidgetInstance,
    children: Vec<WidgetId>,
}

impl Node {
    fn child_ids(&self) -> Vec<WidgetId> {
        match &self.instance {
            WidgetInstance::Sizer(sizer) => sizer.slots().iter().map(|slot| slot.widget).collect(),
            WidgetInstance::Widget(_) => self.children.clone(),
        }
    }

    fn detach(&mut self, child: WidgetId) -> bool {
        match &mut self.instance {
            WidgetInstance::Sizer(sizer) => sizer.remove_child(child),
            WidgetInstance::Widget(_) => {
                let before = self.children.len();
                self.children.retain(|id| *id != child);
                self.children.len() != before
            }
        }
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetTree {
    /// Returns an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Lots::new(),
            live: Vec::new(),
        }
    }

    /// Inserts `widget` with a generated name and returns its id.
    pub fn push(&mut self, widget: impl MakeWidget) -> WidgetId {
        let name = self.unique_name();
        self.insert(name, widget.make_widget())
    }

    /// Inserts `widget` named `name` and returns its id.
    ///
    /// Fails with [`Error::EmptyName`] if `name` is empty.
    pub fn push_named(
        &mut self,
        name: impl Into<Name>,
        widget: impl MakeWidget,
    ) -> crate::Result<WidgetId> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        Ok(self.insert(name, widget.make_widget()))
    }

    fn insert(&mut self, name: Name, instance: WidgetInstance) -> WidgetId {
        let id = WidgetId(self.nodes.push(Node {
            name,
            rect: Rect::default(),
            instance,
            children: Vec::new(),
        }));
        self.live.push(id);
        tracing::debug!(?id, name = %self.nodes[id.0].name, "widget inserted");
        id
    }

    fn unique_name(&self) -> Name {
        loop {
            let name = Name::generate();
            if !self.live.iter().any(|id| self.nodes[id.0].name == name) {
                return name;
            }
        }
    }

    /// Removes `id` from the tree and from every parent it was attached to.
    ///
    /// The widget's own children stay in the tree.
    pub fn remove(&mut self, id: WidgetId) -> Option<WidgetInstance> {
        let node = self.nodes.remove(id.0)?;
        self.live.retain(|live| *live != id);
        for live in &self.live {
            if let Some(parent) = self.nodes.get_mut(live.0) {
                parent.detach(id);
            }
        }
        tracing::debug!(?id, name = %node.name, "widget removed");
        Some(node.instance)
    }

    /// Returns true if `id` refers to a widget in this tree.
    #[must_use]
    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.get(id.0).is_some()
    }

    /// Returns the number of widgets in this tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Returns true if this tree has no widgets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Returns the ids of every widget, in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.live.iter().copied()
    }

    fn node(&self, id: WidgetId) -> crate::Result<&Node> {
        self.nodes.get(id.0).ok_or(Error::UnknownWidget(id))
    }

    fn node_mut(&mut self, id: WidgetId) -> crate::Result<&mut Node> {
        self.nodes.get_mut(id.0).ok_or(Error::UnknownWidget(id))
    }

    /// Returns the widget or sizer stored for `id`.
    #[must_use]
    pub fn get(&self, id: WidgetId) -> Option<&WidgetInstance> {
        self.nodes.get(id.0).map(|node| &node.instance)
    }

    /// Returns exclusive access to the widget or sizer stored for `id`.
    #[must_use]
    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut WidgetInstance> {
        self.nodes.get_mut(id.0).map(|node| &mut node.instance)
    }

    /// Returns the name of `id`.
    #[must_use]
    pub fn name(&self, id: WidgetId) -> Option<&Name> {
        self.nodes.get(id.0).map(|node| &node.name)
    }

    /// Renames `id`.
    ///
    /// Fails with [`Error::EmptyName`] if `name` is empty.
    pub fn set_name(&mut self, id: WidgetId, name: impl Into<Name>) -> crate::Result {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        self.node_mut(id)?.name = name;
        Ok(())
    }

    /// Returns the bounds of `id`.
    #[must_use]
    pub fn rect(&self, id: WidgetId) -> Option<Rect<Px>> {
        self.nodes.get(id.0).map(|node| node.rect)
    }

    /// Sets the bounds of `id`.
    pub fn set_rect(&mut self, id: WidgetId, rect: Rect<Px>) -> crate::Result {
        self.node_mut(id)?.rect = rect;
        Ok(())
    }

    /// Returns the position of `id`.
    #[must_use]
    pub fn position(&self, id: WidgetId) -> Option<Point<Px>> {
        self.rect(id).map(|rect| rect.origin)
    }

    /// Moves `id` to `position`.
    pub fn set_position(&mut self, id: WidgetId, position: Point<Px>) -> crate::Result {
        self.node_mut(id)?.rect.origin = position;
        Ok(())
    }

    /// Returns the size of `id`.
    #[must_use]
    pub fn size(&self, id: WidgetId) -> Option<Size<Px>> {
        self.rect(id).map(|rect| rect.size)
    }

    /// Resizes `id` to `size`.
    pub fn set_size(&mut self, id: WidgetId, size: Size<Px>) -> crate::Result {
        self.node_mut(id)?.rect.size = size;
        Ok(())
    }

    /// Returns the children of `id`, in insertion order.
    #[must_use]
    pub fn children(&self, id: WidgetId) -> Vec<WidgetId> {
        self.nodes.get(id.0).map(Node::child_ids).unwrap_or_default()
    }

    /// Appends `child` to `parent`.
    ///
    /// Sizers give the child a weight of 1.
    pub fn add_child(&mut self, parent: WidgetId, child: WidgetId) -> crate::Result {
        self.attach(parent, child, None)
    }

    /// Appends `child` to the sizer `parent` with a flexible `weight`.
    ///
    /// Fails with [`Error::InvalidWeight`] if `weight` is less than 1, and with
    /// [`Error::NotASizer`] if `parent` is not a sizer.
    pub fn add_weighted(
        &mut self,
        parent: WidgetId,
        child: WidgetId,
        weight: i32,
    ) -> crate::Result {
        let sizing = Sizing::weighted(weight)?;
        self.attach(parent, child, Some(sizing))
    }

    /// Appends `child` to the sizer `parent` with a fixed extent of `size`
    /// pixels along the sizer's primary axis.
    ///
    /// Fails with [`Error::InvalidFixedSize`] if `size` is negative, and with
    /// [`Error::NotASizer`] if `parent` is not a sizer.
    pub fn add_with_fixed_size(
        &mut self,
        parent: WidgetId,
        child: WidgetId,
        size: i32,
    ) -> crate::Result {
        let sizing = Sizing::fixed(size)?;
        self.attach(parent, child, Some(sizing))
    }

    fn attach(
        &mut self,
        parent: WidgetId,
        child: WidgetId,
        sizing: Option<Sizing>,
    ) -> crate::Result {
        self.node(child)?;
        self.node(parent)?;
        if parent == child || self.reaches(child, parent) {
            return Err(Error::Cycle { parent, child });
        }

        let node = self.node_mut(parent)?;
        match (&mut node.instance, sizing) {
            (WidgetInstance::Sizer(sizer), sizing) => sizer.push(child, sizing.unwrap_or_default()),
            (WidgetInstance::Widget(_), None) => node.children.push(child),
            (WidgetInstance::Widget(_), Some(_)) => return Err(Error::NotASizer(parent)),
        }
        tracing::debug!(?parent, ?child, ?sizing, "child attached");
        Ok(())
    }

    /// Returns true if `target` is `from` or one of its descendants.
    fn reaches(&self, from: WidgetId, target: WidgetId) -> bool {
        let mut visited = AHashSet::new();
        let mut pending = vec![from];
        while let Some(id) = pending.pop() {
            if id == target {
                return true;
            }
            if visited.insert(id) {
                pending.extend(self.children(id));
            }
        }
        false
    }

    /// Detaches every occurrence of `child` from `parent`, returning true if
    /// any were found.
    pub fn remove_child(&mut self, parent: WidgetId, child: WidgetId) -> crate::Result<bool> {
        Ok(self.node_mut(parent)?.detach(child))
    }

    /// Lays out the children of the sizer `id` within its current bounds.
    ///
    /// Does nothing for widgets that are not sizers.
    pub fn apply(&mut self, id: WidgetId, spacing: Size<Px>) -> crate::Result {
        let node = self.node(id)?;
        if let WidgetInstance::Sizer(sizer) = &node.instance {
            let placements = sizer.apply(node.rect, spacing);
            self.place(placements);
        }
        Ok(())
    }

    fn place(&mut self, placements: impl IntoIterator<Item = (WidgetId, Rect<Px>)>) {
        for (child, rect) in placements {
            if let Some(node) = self.nodes.get_mut(child.0) {
                node.rect = rect;
            } else {
                tracing::warn!(?child, "cannot place stale widget");
            }
        }
    }

    /// Sets the bounds of `id` and draws it.
    pub fn draw_at(
        &mut self,
        id: WidgetId,
        rect: Rect<Px>,
        surface: &mut dyn Surface,
    ) -> crate::Result {
        self.set_rect(id, rect)?;
        self.draw(id, surface);
        Ok(())
    }

    /// Draws `id` and its descendants, depth-first, onto `surface`.
    ///
    /// Sizers lay out their children using the surface's item spacing before
    /// drawing them. Other widgets follow the
    /// [`Widget`](crate::widget::Widget) protocol: children are drawn only if
    /// `render_begin` succeeds, and `render_end` always runs.
    ///
    /// A widget reached again while it is still being drawn is skipped, so a
    /// sizer that was made its own descendant cannot recurse forever.
    pub fn draw(&mut self, id: WidgetId, surface: &mut dyn Surface) {
        self.draw_node(id, surface, &mut AHashSet::new());
    }

    fn draw_node(
        &mut self,
        id: WidgetId,
        surface: &mut dyn Surface,
        drawing: &mut AHashSet<WidgetId>,
    ) {
        let Some(node) = self.nodes.get_mut(id.0) else {
            tracing::warn!(?id, "skipping stale widget");
            return;
        };
        if !drawing.insert(id) {
            tracing::warn!(?id, "skipping widget that is its own ancestor");
            return;
        }

        match &mut node.instance {
            WidgetInstance::Sizer(sizer) => {
                let placements = sizer.apply(node.rect, surface.item_spacing());
                let children = placements
                    .iter()
                    .map(|(child, _)| *child)
                    .collect::<Vec<_>>();
                self.place(placements);
                for child in children {
                    self.draw_node(child, surface, drawing);
                }
            }
            WidgetInstance::Widget(widget) => {
                let mut context = DrawContext::new(surface, &node.name, node.rect);
                let open = widget.render_begin(&mut context);
                let mut children = Vec::new();
                let mut bounds = None;
                if open {
                    widget.render(&mut context);
                    bounds = widget.content_bounds(&mut context);
                    children.clone_from(&node.children);
                } else {
                    tracing::trace!(?id, "region closed, skipping contents");
                }
                drop(context);

                if let Some(bounds) = bounds {
                    self.place(children.iter().map(|child| (*child, bounds)));
                }
                for child in children {
                    self.draw_node(child, surface, drawing);
                }

                if let Some(node) = self.nodes.get_mut(id.0) {
                    if let WidgetInstance::Widget(widget) = &mut node.instance {
                        let mut context = DrawContext::new(surface, &node.name, node.rect);
                        widget.render_end(&mut context);
                    }
                }
            }
        }
        drawing.remove(&id);
    }
}
