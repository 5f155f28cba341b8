//! Plain-text rendering of courses.

use std::io::{self, Write};

use planner::{Course, LookupError};

use super::terminal::Palette;

pub const LOAD_FIRST: &str = "Please load the data first (option 1).";
pub const NOT_FOUND: &str = "Course not found.";

/// Writes `ID, Title` followed by a blank line.
pub fn course_line<W: Write>(out: &mut W, course: &Course) -> io::Result<()> {
    write!(out, "{}, {}\n\n", course.id, course.title)
}

/// Writes the ordered course listing.
pub fn schedule<'a, W, I>(out: &mut W, palette: Palette, courses: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Course>,
{
    write!(out, "{}\n\n", palette.heading("Here is a sample schedule:"))?;
    for course in courses {
        course_line(out, course)?;
    }
    Ok(())
}

/// Writes a single course with its prerequisites.
pub fn course_detail<W: Write>(out: &mut W, palette: Palette, course: &Course) -> io::Result<()> {
    course_line(out, course)?;

    let label = palette.dim("Prerequisites:");
    if !course.has_prerequisites() {
        return write!(out, "{label} None\n\n");
    }

    let prerequisites = course
        .prerequisites
        .iter()
        .map(planner::CourseId::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    write!(out, "{label} {prerequisites}\n\n")
}

/// Writes the user-facing message for a failed lookup.
pub fn lookup_error<W: Write>(out: &mut W, palette: Palette, error: &LookupError) -> io::Result<()> {
    let message = match error {
        LookupError::Uninitialized => LOAD_FIRST,
        LookupError::NotFound(_) => NOT_FOUND,
    };
    writeln!(out, "{}", palette.warning(message))
}

#[cfg(test)]
mod tests {
    use planner::CourseId;

    use super::*;

    fn rendered(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buffer = Vec::new();
        f(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn detail_without_prerequisites() {
        let course = Course::new("CSCI100", "Introduction to Computer Science");
        let text = rendered(|out| course_detail(out, Palette::plain(), &course));
        assert_eq!(
            text,
            "CSCI100, Introduction to Computer Science\n\nPrerequisites: None\n\n"
        );
    }

    #[test]
    fn detail_with_prerequisites() {
        let course =
            Course::new("CSCI300", "Introduction to Algorithms").with_prerequisites(["CSCI200", "MATH201"]);
        let text = rendered(|out| course_detail(out, Palette::plain(), &course));
        assert_eq!(
            text,
            "CSCI300, Introduction to Algorithms\n\nPrerequisites: CSCI200, MATH201\n\n"
        );
    }

    #[test]
    fn schedule_lists_in_given_order() {
        let courses = [Course::new("A", "First"), Course::new("B", "Second")];
        let text = rendered(|out| schedule(out, Palette::plain(), &courses));
        assert_eq!(text, "Here is a sample schedule:\n\nA, First\n\nB, Second\n\n");
    }

    #[test]
    fn lookup_errors() {
        let uninitialized =
            rendered(|out| lookup_error(out, Palette::plain(), &LookupError::Uninitialized));
        assert_eq!(uninitialized, format!("{LOAD_FIRST}\n"));

        let missing = rendered(|out| {
            lookup_error(out, Palette::plain(), &LookupError::NotFound(CourseId::new("X")))
        });
        assert_eq!(missing, format!("{NOT_FOUND}\n"));
    }
}
