//! Configuration validation.
//!
//! Validates catalog, pricing, and alert config sections up front.

use crate::domain::error::PricedeskError;
use crate::ports::config_port::ConfigPort;

pub fn validate_catalog_config(config: &dyn ConfigPort) -> Result<(), PricedeskError> {
    let source = config
        .get_string("catalog", "source")
        .unwrap_or_else(|| "demo".to_string());
    match source.as_str() {
        "demo" => Ok(()),
        "csv" => match config.get_string("catalog", "path") {
            Some(p) if !p.trim().is_empty() => Ok(()),
            _ => Err(PricedeskError::ConfigMissing {
                section: "catalog".to_string(),
                key: "path".to_string(),
            }),
        },
        other => Err(PricedeskError::ConfigInvalid {
            section: "catalog".to_string(),
            key: "source".to_string(),
            reason: format!("unknown source '{other}' (expected demo or csv)"),
        }),
    }
}

pub fn validate_pricing_config(config: &dyn ConfigPort) -> Result<(), PricedeskError> {
    validate_demand_range(config)?;
    validate_market_band(config)?;
    validate_oos_bump(config)?;
    validate_lifecycle_rates(config)?;
    Ok(())
}

pub fn validate_alert_config(config: &dyn ConfigPort) -> Result<(), PricedeskError> {
    validate_margin_floor(config)?;
    validate_deviation_ceiling(config)?;
    validate_demand_surge(config)?;
    Ok(())
}

fn validate_demand_range(config: &dyn ConfigPort) -> Result<(), PricedeskError> {
    let up_min = config.get_double("pricing", "demand_up_min", 0.05);
    let up_max = config.get_double("pricing", "demand_up_max", 0.10);
    let down_max = config.get_double("pricing", "demand_down_max", 0.10);

    if up_min < 0.0 || up_max < 0.0 || up_min > up_max {
        return Err(PricedeskError::ConfigInvalid {
            section: "pricing".to_string(),
            key: "demand_up_min".to_string(),
            reason: "demand uplift range must be non-negative with min <= max".to_string(),
        });
    }
    if !(0.0..1.0).contains(&down_max) {
        return Err(PricedeskError::ConfigInvalid {
            section: "pricing".to_string(),
            key: "demand_down_max".to_string(),
            reason: "demand_down_max must be in [0, 1)".to_string(),
        });
    }
    Ok(())
}

fn validate_market_band(config: &dyn ConfigPort) -> Result<(), PricedeskError> {
    let low = config.get_double("pricing", "market_band_low", -0.10);
    let high = config.get_double("pricing", "market_band_high", 0.15);
    if low >= high {
        return Err(PricedeskError::ConfigInvalid {
            section: "pricing".to_string(),
            key: "market_band_low".to_string(),
            reason: "market_band_low must be below market_band_high".to_string(),
        });
    }
    if low <= -1.0 {
        return Err(PricedeskError::ConfigInvalid {
            section: "pricing".to_string(),
            key: "market_band_low".to_string(),
            reason: "market_band_low must be above -1".to_string(),
        });
    }
    Ok(())
}

fn validate_oos_bump(config: &dyn ConfigPort) -> Result<(), PricedeskError> {
    let min = config.get_double("pricing", "oos_bump_min", 0.05);
    let max = config.get_double("pricing", "oos_bump_max", 0.10);
    if min < 0.0 || min > max {
        return Err(PricedeskError::ConfigInvalid {
            section: "pricing".to_string(),
            key: "oos_bump_min".to_string(),
            reason: "out-of-stock bump range must be non-negative with min <= max".to_string(),
        });
    }
    Ok(())
}

fn validate_lifecycle_rates(config: &dyn ConfigPort) -> Result<(), PricedeskError> {
    for key in ["launch_discount", "decline_discount"] {
        let value = config.get_double("pricing", key, 0.0);
        if !(0.0..1.0).contains(&value) {
            return Err(PricedeskError::ConfigInvalid {
                section: "pricing".to_string(),
                key: key.to_string(),
                reason: format!("{key} must be in [0, 1)"),
            });
        }
    }
    let growth = config.get_double("pricing", "growth_increase", 0.0);
    if growth < 0.0 {
        return Err(PricedeskError::ConfigInvalid {
            section: "pricing".to_string(),
            key: "growth_increase".to_string(),
            reason: "growth_increase must be non-negative".to_string(),
        });
    }
    Ok(())
}

fn validate_margin_floor(config: &dyn ConfigPort) -> Result<(), PricedeskError> {
    let value = config.get_double("alerts", "margin_floor", 0.20);
    if !(0.0..1.0).contains(&value) {
        return Err(PricedeskError::ConfigInvalid {
            section: "alerts".to_string(),
            key: "margin_floor".to_string(),
            reason: "margin_floor must be in [0, 1)".to_string(),
        });
    }
    Ok(())
}

fn validate_deviation_ceiling(config: &dyn ConfigPort) -> Result<(), PricedeskError> {
    let value = config.get_double("alerts", "deviation_ceiling", 0.15);
    if value <= 0.0 {
        return Err(PricedeskError::ConfigInvalid {
            section: "alerts".to_string(),
            key: "deviation_ceiling".to_string(),
            reason: "deviation_ceiling must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_demand_surge(config: &dyn ConfigPort) -> Result<(), PricedeskError> {
    let value = config.get_double("alerts", "demand_surge", 1.4);
    if value <= 0.0 {
        return Err(PricedeskError::ConfigInvalid {
            section: "alerts".to_string(),
            key: "demand_surge".to_string(),
            reason: "demand_surge must be positive".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn make_config(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    #[test]
    fn defaults_pass_all_validation() {
        let config = make_config("[catalog]\nsource = demo\n");
        assert!(validate_catalog_config(&config).is_ok());
        assert!(validate_pricing_config(&config).is_ok());
        assert!(validate_alert_config(&config).is_ok());
    }

    #[test]
    fn csv_source_requires_path() {
        let config = make_config("[catalog]\nsource = csv\n");
        let err = validate_catalog_config(&config).unwrap_err();
        assert!(matches!(err, PricedeskError::ConfigMissing { key, .. } if key == "path"));
    }

    #[test]
    fn csv_source_with_path_passes() {
        let config = make_config("[catalog]\nsource = csv\npath = products.csv\n");
        assert!(validate_catalog_config(&config).is_ok());
    }

    #[test]
    fn unknown_source_fails() {
        let config = make_config("[catalog]\nsource = oracle\n");
        let err = validate_catalog_config(&config).unwrap_err();
        assert!(matches!(err, PricedeskError::ConfigInvalid { key, .. } if key == "source"));
    }

    #[test]
    fn inverted_demand_range_fails() {
        let config = make_config("[pricing]\ndemand_up_min = 0.2\ndemand_up_max = 0.1\n");
        let err = validate_pricing_config(&config).unwrap_err();
        assert!(matches!(err, PricedeskError::ConfigInvalid { key, .. } if key == "demand_up_min"));
    }

    #[test]
    fn demand_down_max_above_one_fails() {
        let config = make_config("[pricing]\ndemand_down_max = 1.5\n");
        let err = validate_pricing_config(&config).unwrap_err();
        assert!(
            matches!(err, PricedeskError::ConfigInvalid { key, .. } if key == "demand_down_max")
        );
    }

    #[test]
    fn inverted_market_band_fails() {
        let config = make_config("[pricing]\nmarket_band_low = 0.2\nmarket_band_high = 0.1\n");
        let err = validate_pricing_config(&config).unwrap_err();
        assert!(
            matches!(err, PricedeskError::ConfigInvalid { key, .. } if key == "market_band_low")
        );
    }

    #[test]
    fn inverted_oos_bump_fails() {
        let config = make_config("[pricing]\noos_bump_min = 0.2\noos_bump_max = 0.1\n");
        let err = validate_pricing_config(&config).unwrap_err();
        assert!(matches!(err, PricedeskError::ConfigInvalid { key, .. } if key == "oos_bump_min"));
    }

    #[test]
    fn launch_discount_out_of_range_fails() {
        let config = make_config("[pricing]\nlaunch_discount = 1.2\n");
        let err = validate_pricing_config(&config).unwrap_err();
        assert!(
            matches!(err, PricedeskError::ConfigInvalid { key, .. } if key == "launch_discount")
        );
    }

    #[test]
    fn margin_floor_out_of_range_fails() {
        let config = make_config("[alerts]\nmargin_floor = 1.2\n");
        let err = validate_alert_config(&config).unwrap_err();
        assert!(matches!(err, PricedeskError::ConfigInvalid { key, .. } if key == "margin_floor"));
    }

    #[test]
    fn negative_deviation_ceiling_fails() {
        let config = make_config("[alerts]\ndeviation_ceiling = -0.1\n");
        let err = validate_alert_config(&config).unwrap_err();
        assert!(
            matches!(err, PricedeskError::ConfigInvalid { key, .. } if key == "deviation_ceiling")
        );
    }

    #[test]
    fn zero_demand_surge_fails() {
        let config = make_config("[alerts]\ndemand_surge = 0\n");
        let err = validate_alert_config(&config).unwrap_err();
        assert!(matches!(err, PricedeskError::ConfigInvalid { key, .. } if key == "demand_surge"));
    }
}
