//! Per-class accumulator for the class members transform.

use esdown_parser::parser::NodeIndex;

/// Members collected from one open class.
///
/// `instance_members` and `static_members` together hold every field and
/// static block of the class exactly once, each list in source order.
#[derive(Debug)]
pub(super) struct ClassRecord {
    pub(super) class: NodeIndex,
    /// Dotted name static code uses to refer to the class.
    pub(super) qualified_name: String,
    /// Statement after which static members are placed.
    pub(super) declaring_statement: NodeIndex,
    pub(super) instance_members: Vec<NodeIndex>,
    pub(super) static_members: Vec<NodeIndex>,
    /// Set for classes with nothing to lower or nowhere to put it.
    passive: bool,
}

impl ClassRecord {
    pub(super) fn new(
        class: NodeIndex,
        qualified_name: String,
        declaring_statement: NodeIndex,
    ) -> Self {
        Self {
            class,
            qualified_name,
            declaring_statement,
            instance_members: Vec::new(),
            static_members: Vec::new(),
            passive: false,
        }
    }

    /// A record that only marks `class` as open.
    pub(super) fn passive(class: NodeIndex) -> Self {
        Self {
            class,
            qualified_name: String::new(),
            declaring_statement: NodeIndex::NONE,
            instance_members: Vec::new(),
            static_members: Vec::new(),
            passive: true,
        }
    }

    pub(super) const fn is_lowered(&self) -> bool {
        !self.passive
    }

    /// Leave the class as parsed and drop what was recorded.
    pub(super) fn abandon(&mut self) {
        self.passive = true;
        self.instance_members.clear();
        self.static_members.clear();
    }

    pub(super) fn record(&mut self, member: NodeIndex, is_static: bool) {
        if is_static {
            self.static_members.push(member);
        } else {
            self.instance_members.push(member);
        }
    }
}
