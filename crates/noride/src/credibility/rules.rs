use super::ScoringInput;

pub const FLAG_DUPLICATE_IMAGE: &str = "Duplicate image detected";
pub const FLAG_STOCK_IMAGE: &str = "Stock/internet image detected";
pub const FLAG_REPEAT_SOURCE: &str = "Multiple reports from same device recently";
pub const FLAG_GEOLOCATION_ANOMALY: &str = "Geolocation anomaly detected";
pub const FLAG_VELOCITY_SPIKE: &str = "Unusual spike in reports for this vehicle";
pub const FLAG_ODD_HOURS: &str = "Report submitted during odd hours";

const VELOCITY_LIMIT: u32 = 10;
const DETAILED_DESCRIPTION_CHARS: u32 = 50;

pub(crate) struct RuleTally {
    pub added_points: i32,
    pub subtracted_points: i32,
    pub flags: Vec<String>,
}

impl RuleTally {
    fn add_if(&mut self, condition: bool, points: i32) {
        if condition {
            self.added_points += points;
        }
    }

    fn penalize_if(&mut self, condition: bool, points: i32, flag: &str) {
        if condition {
            self.subtracted_points += points;
            self.flags.push(flag.to_string());
        }
    }
}

pub(crate) fn tally(input: &ScoringInput) -> RuleTally {
    let mut tally = RuleTally {
        added_points: 0,
        subtracted_points: 0,
        flags: Vec::new(),
    };

    tally.add_if(input.has_images && input.vehicle_number_provided, 30);
    tally.add_if(input.has_gps, 25);
    tally.add_if(!input.is_anonymous, 20);
    tally.add_if(input.image_count > 1, 15);
    tally.add_if(input.description_length > DETAILED_DESCRIPTION_CHARS, 10);

    tally.penalize_if(input.is_duplicate_image, 20, FLAG_DUPLICATE_IMAGE);
    tally.penalize_if(input.is_stock_image, 15, FLAG_STOCK_IMAGE);
    tally.penalize_if(input.same_source_reported_recently, 15, FLAG_REPEAT_SOURCE);
    tally.penalize_if(input.geolocation_anomaly, 10, FLAG_GEOLOCATION_ANOMALY);
    tally.penalize_if(input.report_velocity > VELOCITY_LIMIT, 20, FLAG_VELOCITY_SPIKE);
    tally.penalize_if((2..=5).contains(&input.submitted_hour), 5, FLAG_ODD_HOURS);

    tally
}
