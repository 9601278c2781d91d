//! Display implementations for the plan parts.
//!
//! Each part renders as one markdown card headed by a `###` line, so a
//! segment's card count is the number of `###` headers it emits.

use std::fmt;

use crate::models::{DaySchedule, Focus, HabitGoal, RoutineTask};

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RoutineTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "### {} - {}", self.time, self.activity)?;
        if !self.focus.as_str().is_empty() {
            write!(f, " `{}`", self.focus)?;
        }
        writeln!(f)?;
        writeln!(f)?;

        if !self.description.is_empty() {
            writeln!(f, "{}", self.description)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for HabitGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}", self.habit)?;
        writeln!(f)?;
        writeln!(f, "- **Frequency**: {}", self.frequency)?;
        writeln!(f, "- **Benefit**: {}", self.benefit)?;
        writeln!(f)
    }
}

impl fmt::Display for DaySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}: {}", self.day, self.focus)?;
        writeln!(f)?;
        writeln!(f, "{}", self.key_task)?;
        writeln!(f)
    }
}
