//! Non-fatal sanity report on a loaded store

use super::{Family, HydroStore};
use crate::types::DOF_NAMES;

impl HydroStore {
    /// Human readable list of suspicious data; empty when nothing was found
    pub fn check(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if let Err(e) = self.validate_dimensions("check") {
            issues.push(e.to_string());
            return issues;
        }
        if self.w.windows(2).any(|w| w[1] <= w[0]) {
            issues.push("frequencies are not strictly increasing".into());
        }
        if self.w.iter().any(|&w| w < 0.0) {
            issues.push("negative frequencies".into());
        }

        if self.is_loaded(Family::B) {
            let (n6, nf) = (self.n6(), self.nf());
            for i in 0..n6 {
                let negative = (0..nf).filter(|&k| self.b_dim(i, i, k).is_some_and(|v| v < 0.0)).count();
                if negative > 0 {
                    issues.push(format!(
                        "body {} {}: {} negative diagonal damping values",
                        i / 6 + 1,
                        DOF_NAMES[i % 6],
                        negative
                    ));
                }
            }
        }

        if let Some(a) = &self.a {
            let (n6, _, nf) = a.dim();
            let mut asym = 0;
            for i in 0..n6 {
                for j in (i + 1)..n6 {
                    for k in 0..nf {
                        if let (Some(x), Some(y)) = (a[[i, j, k]], a[[j, i, k]]) {
                            let scale = x.abs().max(y.abs());
                            if scale > 0.0 && (x - y).abs() > 1e-3 * scale {
                                asym += 1;
                            }
                        }
                    }
                }
            }
            if asym > 0 {
                issues.push(format!("added mass is asymmetric in {asym} entries"));
            }
        }

        for (ib, body) in self.bodies.iter().enumerate() {
            if body.m.is_none() {
                issues.push(format!("body {} ({}): mass matrix missing", ib + 1, body.name));
            }
        }

        let crossed = self.qhead.iter().filter(|q| q.is_crossed()).count();
        if crossed > 0 && self.is_loaded(Family::QtfDif) {
            issues.push(format!("{crossed} crossed QTF heading pairs"));
        }

        for msg in &issues {
            log::warn!("{}: {}", self.name, msg);
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use crate::config::HydroConfig;
    use crate::store::{Family, HydroStore};

    #[test]
    fn test_check_reports_problems() {
        let mut s = HydroStore::new(1, vec![1.0, 0.5], vec![0.0], &HydroConfig::default());
        s.init(Family::B);
        s.b.as_mut().unwrap()[[2, 2, 0]] = Some(-1.0);
        let issues = s.check();
        assert!(issues.iter().any(|m| m.contains("not strictly increasing")));
        assert!(issues.iter().any(|m| m.contains("heave")));
        assert!(issues.iter().any(|m| m.contains("mass matrix missing")));
    }

    #[test]
    fn test_check_clean_store() {
        let mut s = HydroStore::new(1, vec![0.5, 1.0], vec![0.0], &HydroConfig::default());
        s.init(Family::Mass);
        assert!(s.check().is_empty());
    }
}
