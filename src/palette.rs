/// Fixed categorical color assignment for grouped charts.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    colors: Vec<&'static str>,
}

impl ColorPalette {
    /// The classic ten-color categorical palette.
    pub fn category10() -> Self {
        ColorPalette {
            colors: vec![
                "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2",
                "#7f7f7f", "#bcbd22", "#17becf",
            ],
        }
    }

    /// Assign a fixed color to each key, in the order the keys are given.
    /// Cycles when there are more keys than colors.
    pub fn assign_colors(&self, keys: &[String]) -> Vec<(String, String)> {
        keys.iter()
            .enumerate()
            .map(|(i, key)| {
                (
                    key.clone(),
                    self.colors[i % self.colors.len()].to_string(),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_is_ordered_and_stable() {
        let keys: Vec<String> = ["video", "image", "link"].iter().map(|s| s.to_string()).collect();
        let assigned = ColorPalette::category10().assign_colors(&keys);

        assert_eq!(assigned[0], ("video".to_string(), "#1f77b4".to_string()));
        assert_eq!(assigned[1], ("image".to_string(), "#ff7f0e".to_string()));
        assert_eq!(assigned[2], ("link".to_string(), "#2ca02c".to_string()));
    }

    #[test]
    fn test_assignment_cycles() {
        let keys: Vec<String> = (0..12).map(|i| format!("k{i}")).collect();
        let assigned = ColorPalette::category10().assign_colors(&keys);
        assert_eq!(assigned[10].1, assigned[0].1);
    }
}
