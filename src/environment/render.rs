//! Text rendering of the map, a policy grid and a value grid.

use std::fmt;

use super::error::EnvironmentError;
use super::grid::GridWorld;
use super::types::Action;

impl fmt::Display for GridWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells().chunks(self.columns()) {
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl GridWorld {
    /// Renders a policy as a grid of arrows, one line per row.
    ///
    /// # Errors
    ///
    /// * [`EnvironmentError::LengthMismatch`] if `policy` does not have one entry per state
    /// * [`EnvironmentError::InvalidAction`] for an out-of-range action
    pub fn render_policy(&self, policy: &[usize]) -> Result<String, EnvironmentError> {
        self.check_len(policy.len())?;
        let mut out = String::new();
        for row in policy.chunks(self.columns()) {
            for &action in row {
                out.push_str(Action::from_index(action)?.symbol());
            }
            out.push('\n');
        }
        Ok(out)
    }

    /// Renders a value function as a row-major grid with three decimals.
    pub fn render_values(&self, value: &[f64]) -> Result<String, EnvironmentError> {
        self.check_len(value.len())?;
        let mut out = String::new();
        for row in value.chunks(self.columns()) {
            let line: Vec<String> = row.iter().map(|v| format!("{v:>8.3}")).collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
        Ok(out)
    }

    fn check_len(&self, found: usize) -> Result<(), EnvironmentError> {
        if found != self.n_states() {
            return Err(EnvironmentError::LengthMismatch {
                expected: self.n_states(),
                found,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::GridWorldConfig;

    fn small() -> GridWorld {
        GridWorld::from_design(&["0#", "*0"], &GridWorldConfig::default()).unwrap()
    }

    #[test]
    fn map_rendering() {
        assert_eq!(small().to_string(), "⬜️❌\n✅⬜️\n");
    }

    #[test]
    fn policy_rendering() {
        let out = small().render_policy(&[0, 1, 2, 4]).unwrap();
        assert_eq!(out, "⏫⏩\n⏬🔄\n");
    }

    #[test]
    fn policy_rendering_checks_input() {
        let env = small();
        assert_eq!(
            env.render_policy(&[0, 1]),
            Err(EnvironmentError::LengthMismatch {
                expected: 4,
                found: 2
            })
        );
        assert!(matches!(
            env.render_policy(&[0, 1, 2, 9]),
            Err(EnvironmentError::InvalidAction { action: 9, .. })
        ));
    }

    #[test]
    fn value_rendering() {
        let out = small().render_values(&[1.0, -0.5, 10.0, 0.25]).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("1.000"));
        assert!(lines[0].contains("-0.500"));
        assert!(lines[1].contains("10.000"));
        assert!(lines[1].contains("0.250"));
        assert_eq!(out, "   1.000   -0.500\n  10.000    0.250\n");
    }
}
