//! An ordered in-memory tree of courses
//!
//! The [`CourseTree`] knows nothing about files or delimiters. It is an
//! unbalanced binary search tree keyed by [`CourseId`]; its shape depends only
//! on insertion order. Sorted input produces a tree that is effectively a
//! linked list, so every walk over the tree (insert, lookup, traversal and
//! teardown) is iterative rather than recursive.

use std::{cmp::Ordering, fmt, iter::FusedIterator};

use crate::domain::{Course, CourseId};

/// An ordered, key-unique collection of courses.
///
/// Each node exclusively owns its record and its two child subtrees. There
/// are no parent pointers and nothing is shared, so dropping a node releases
/// its whole subtree.
#[derive(Default)]
pub struct CourseTree {
    root: Option<Box<Node>>,
    len: usize,
}

struct Node {
    course: Course,
    left: Option<Box<Self>>,
    right: Option<Box<Self>>,
}

impl Node {
    const fn leaf(course: Course) -> Self {
        Self {
            course,
            left: None,
            right: None,
        }
    }
}

/// The result of inserting a course into a [`CourseTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// A new node was created for the course.
    Inserted,
    /// A course with the same identifier already existed; its title and
    /// prerequisites were overwritten in place.
    Replaced,
}

impl CourseTree {
    /// Creates an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Returns the number of courses in the tree.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no courses.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Inserts a course, replacing the title and prerequisites of any course
    /// that already has the same identifier.
    ///
    /// No rebalancing is performed.
    pub fn insert(&mut self, course: Course) -> Insertion {
        let mut slot = &mut self.root;
        loop {
            match slot {
                None => {
                    *slot = Some(Box::new(Node::leaf(course)));
                    self.len += 1;
                    return Insertion::Inserted;
                }
                Some(node) => match course.id.cmp(&node.course.id) {
                    Ordering::Less => slot = &mut node.left,
                    Ordering::Greater => slot = &mut node.right,
                    Ordering::Equal => {
                        node.course.title = course.title;
                        node.course.prerequisites = course.prerequisites;
                        return Insertion::Replaced;
                    }
                },
            }
        }
    }

    /// Looks up a course by its normalized identifier.
    #[must_use]
    pub fn get(&self, id: &CourseId) -> Option<&Course> {
        let key = id.as_str();
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(node.course.id.as_str()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.course),
            };
        }
        None
    }

    /// Looks up a course by a raw, un-normalized key.
    ///
    /// The key is normalized the same way identifiers are normalized on
    /// insertion, so `"cs 101"` finds the course stored as `CS101`.
    #[must_use]
    pub fn find(&self, raw_key: &str) -> Option<&Course> {
        self.get(&CourseId::new(raw_key))
    }

    /// Returns an iterator over the courses in ascending identifier order.
    ///
    /// The iterator is lazy. Calling `iter` again starts a fresh traversal.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.root.as_deref(), self.len)
    }

    /// Returns the number of nodes on the longest path from the root to a
    /// leaf. An empty tree has height zero.
    #[must_use]
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node, usize)> = self.root.as_deref().map(|n| (n, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }
        height
    }

    /// Releases every node, leaving the tree empty.
    ///
    /// Children are always released before their parent. Returns the number
    /// of nodes released.
    pub fn teardown(&mut self) -> usize {
        self.len = 0;
        release(self.root.take())
    }
}

/// Post-order release without recursion.
///
/// A node is pushed back beneath its detached children and dropped on its
/// second visit, once it has no children left.
fn release(root: Option<Box<Node>>) -> usize {
    let mut released = 0;
    let mut stack: Vec<Box<Node>> = root.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        let left = node.left.take();
        let right = node.right.take();
        if left.is_none() && right.is_none() {
            drop(node);
            released += 1;
        } else {
            stack.push(node);
            stack.extend(right);
            stack.extend(left);
        }
    }
    released
}

impl Drop for CourseTree {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl fmt::Debug for CourseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Extend<Course> for CourseTree {
    fn extend<I: IntoIterator<Item = Course>>(&mut self, iter: I) {
        for course in iter {
            self.insert(course);
        }
    }
}

impl FromIterator<Course> for CourseTree {
    fn from_iter<I: IntoIterator<Item = Course>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a> IntoIterator for &'a CourseTree {
    type Item = &'a Course;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over a [`CourseTree`].
///
/// Holds the path of pending ancestors on an explicit stack.
#[derive(Clone)]
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    fn new(root: Option<&'a Node>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.descend_left(root);
        iter
    }

    fn descend_left(&mut self, mut node: Option<&'a Node>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Course;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend_left(node.right.as_deref());
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.course)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl fmt::Debug for Iter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn course(id: &str, title: &str) -> Course {
        Course::new(id, title)
    }

    fn ids(tree: &CourseTree) -> Vec<&str> {
        tree.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn empty_tree() {
        let tree = CourseTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert!(tree.find("CS101").is_none());
        assert_eq!(tree.iter().next(), None);
    }

    #[test]
    fn first_insert_becomes_root() {
        let mut tree = CourseTree::new();
        assert_eq!(tree.insert(course("CS101", "Intro")), Insertion::Inserted);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.find("cs101").unwrap().title, "Intro");
    }

    #[test_case(&["CSCI300", "CSCI100", "MATH201", "CSCI200", "CSCI101"]; "mixed order")]
    #[test_case(&["A", "B", "C", "D", "E"]; "ascending")]
    #[test_case(&["E", "D", "C", "B", "A"]; "descending")]
    #[test_case(&["C", "A", "E", "B", "D"]; "balanced order")]
    fn iteration_is_sorted(input: &[&str]) {
        let tree: CourseTree = input.iter().map(|id| course(id, "t")).collect();

        let mut expected = input.to_vec();
        expected.sort_unstable();
        assert_eq!(ids(&tree), expected);
        assert_eq!(tree.iter().len(), input.len());
    }

    #[test]
    fn duplicate_identifier_replaces_in_place() {
        let mut tree = CourseTree::new();
        tree.insert(course("cs101", "Intro"));
        let outcome = tree.insert(Course::new("CS 101", "Intro to CS").with_prerequisites(["CS100"]));

        assert_eq!(outcome, Insertion::Replaced);
        assert_eq!(tree.len(), 1);

        let found = tree.find("cs101").unwrap();
        assert_eq!(found.title, "Intro to CS");
        assert_eq!(found.prerequisites, [CourseId::new("CS100")]);
    }

    #[test]
    fn replacement_does_not_change_shape() {
        let mut tree: CourseTree = ["M", "F", "T"].into_iter().map(|id| course(id, "old")).collect();
        let height = tree.height();

        tree.insert(course("F", "new"));

        assert_eq!(tree.height(), height);
        assert_eq!(ids(&tree), ["F", "M", "T"]);
        assert_eq!(tree.find("f").unwrap().title, "new");
    }

    #[test]
    fn replacement_can_clear_prerequisites() {
        let mut tree = CourseTree::new();
        tree.insert(Course::new("CS200", "DS").with_prerequisites(["CS101"]));
        tree.insert(Course::new("CS200", "DS"));

        assert!(tree.find("CS200").unwrap().prerequisites.is_empty());
    }

    #[test]
    fn count_matches_distinct_identifiers() {
        let input = ["cs101", "CS 101", "math201", "MATH 201", "phys110", "cs101"];
        let tree: CourseTree = input.into_iter().map(|id| course(id, "t")).collect();

        assert_eq!(tree.len(), 3);
        assert_eq!(ids(&tree), ["CS101", "MATH201", "PHYS110"]);
    }

    #[test]
    fn find_never_partially_matches() {
        let tree: CourseTree = ["CS101", "CS1010"].into_iter().map(|id| course(id, "t")).collect();

        assert!(tree.find("CS10").is_none());
        assert!(tree.find("CS10101").is_none());
        assert_eq!(tree.find("cs 1010").unwrap().id, "CS1010");
    }

    #[test]
    fn lookup_normalizes_key() {
        let tree: CourseTree = [course("CSCI 200", "Data Structures")].into_iter().collect();
        assert!(tree.find(" csci200 ").is_some());
        assert!(tree.get(&CourseId::new("CSCI200")).is_some());
    }

    #[test]
    fn shape_follows_insertion_order() {
        let ascending: CourseTree = (0..32).map(|i| course(&format!("C{i:03}"), "t")).collect();
        assert_eq!(ascending.height(), 32);

        let interleaved: CourseTree = ["D", "B", "F", "A", "C", "E", "G"]
            .into_iter()
            .map(|id| course(id, "t"))
            .collect();
        assert_eq!(interleaved.height(), 3);
    }

    #[test]
    fn iteration_is_restartable() {
        let tree: CourseTree = ["B", "A", "C"].into_iter().map(|id| course(id, "t")).collect();

        let mut first = tree.iter();
        assert_eq!(first.next().unwrap().id, "A");

        assert_eq!(ids(&tree), ["A", "B", "C"]);
        assert_eq!(first.next().unwrap().id, "B");
    }

    #[test]
    fn teardown_releases_every_node() {
        let mut tree: CourseTree = ["M", "F", "T", "A", "H", "Z"]
            .into_iter()
            .map(|id| course(id, "t"))
            .collect();

        assert_eq!(tree.teardown(), 6);
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.find("M").is_none());
        assert_eq!(tree.teardown(), 0);
    }

    /// Builds the right-leaning chain that ascending insertion would produce,
    /// without paying for quadratic insertion.
    fn chain(len: usize) -> CourseTree {
        let mut root = None;
        for i in (0..len).rev() {
            root = Some(Box::new(Node {
                course: course(&format!("C{i:07}"), ""),
                left: None,
                right: root,
            }));
        }
        CourseTree { root, len }
    }

    #[test]
    fn ascending_inserts_build_a_chain() {
        let mut tree = CourseTree::new();
        for i in 0..500 {
            tree.insert(course(&format!("C{i:07}"), ""));
        }
        assert_eq!(tree.height(), 500);
        assert_eq!(tree.iter().count(), chain(500).iter().count());
    }

    #[test]
    fn degenerate_tree_walks_without_overflow() {
        let mut tree = chain(300_000);

        assert_eq!(tree.iter().count(), 300_000);
        assert_eq!(tree.height(), 300_000);
        assert!(tree.find("C0299999").is_some());

        tree.insert(course("C9999999", "last"));
        assert_eq!(tree.len(), 300_001);

        assert_eq!(tree.teardown(), 300_001);
    }

    #[test]
    fn degenerate_tree_drops_without_overflow() {
        let tree = chain(300_000);
        drop(tree);
    }

    #[test]
    fn debug_lists_courses_in_order() {
        let tree: CourseTree = ["B", "A"].into_iter().map(|id| course(id, "t")).collect();
        let debug = format!("{tree:?}");
        assert!(debug.find("\"A\"").unwrap() < debug.find("\"B\"").unwrap());
    }
}
