//! Reference catalog of Indian locations with published irradiance figures.
//!
//! GHI / DNI in kWh/m²/day. Score, capacity and generation are the published
//! figures and are kept as-is by the deriver.

use crate::models::location::LocationRecord;

struct Site {
    id: &'static str,
    name: &'static str,
    state: &'static str,
    district: Option<&'static str>,
    ghi: f64,
    dni: f64,
    latitude: f64,
    longitude: f64,
    solar_score: u8,
    capacity_mw: u32,
    generation_mwh: u64,
}

#[allow(clippy::too_many_arguments)]
const fn site(
    id: &'static str,
    name: &'static str,
    state: &'static str,
    district: Option<&'static str>,
    ghi: f64,
    dni: f64,
    latitude: f64,
    longitude: f64,
    solar_score: u8,
    capacity_mw: u32,
    generation_mwh: u64,
) -> Site {
    Site { id, name, state, district, ghi, dni, latitude, longitude, solar_score, capacity_mw, generation_mwh }
}

const SITES: &[Site] = &[
    site("delhi-1", "New Delhi", "Delhi", Some("New Delhi"), 5.2, 5.7, 28.6139, 77.2090, 73, 2000, 3200000),
    site("jodhpur-1", "Jodhpur", "Rajasthan", Some("Jodhpur"), 6.1, 6.8, 26.2389, 73.0243, 88, 5000, 8500000),
    site("jaisalmer-1", "Jaisalmer", "Rajasthan", Some("Jaisalmer"), 6.3, 7.0, 26.9157, 70.9083, 91, 5500, 9200000),
    site("bikaner-1", "Bikaner", "Rajasthan", Some("Bikaner"), 6.0, 6.7, 28.0229, 73.3119, 86, 4700, 8000000),
    site("barmer-1", "Barmer", "Rajasthan", Some("Barmer"), 6.2, 6.9, 25.7521, 71.3967, 89, 5200, 8800000),
    site("jaipur-1", "Jaipur", "Rajasthan", Some("Jaipur"), 5.9, 6.5, 26.9124, 75.7873, 84, 4400, 7500000),
    site("kutch-1", "Kutch", "Gujarat", Some("Kutch"), 6.0, 6.6, 23.7337, 69.8597, 87, 4900, 8300000),
    site("ahmedabad-1", "Ahmedabad", "Gujarat", Some("Ahmedabad"), 5.8, 6.3, 23.0225, 72.5714, 82, 4200, 7100000),
    site("surat-1", "Surat", "Gujarat", Some("Surat"), 5.6, 6.1, 21.1702, 72.8311, 79, 3800, 6500000),
    site("banaskantha-1", "Banaskantha", "Gujarat", Some("Banaskantha"), 5.9, 6.5, 24.1722, 72.3693, 85, 4500, 7700000),
    site("pune-1", "Pune", "Maharashtra", Some("Pune"), 5.6, 6.0, 18.5204, 73.8567, 78, 3700, 6300000),
    site("nagpur-1", "Nagpur", "Maharashtra", Some("Nagpur"), 5.7, 6.2, 21.1458, 79.0882, 80, 4000, 6800000),
    site("mumbai-1", "Mumbai", "Maharashtra", Some("Mumbai"), 5.5, 5.9, 19.0760, 72.8777, 76, 3400, 5800000),
    site("chennai-1", "Chennai", "Tamil Nadu", Some("Chennai"), 5.4, 5.7, 13.0827, 80.2707, 74, 3100, 5300000),
    site("ramanathapuram-1", "Ramanathapuram", "Tamil Nadu", Some("Ramanathapuram"), 5.8, 6.3, 9.3639, 78.8395, 83, 4300, 7300000),
    site("tuticorin-1", "Tuticorin", "Tamil Nadu", Some("Tuticorin"), 5.7, 6.2, 8.7642, 78.1348, 81, 4100, 7000000),
    site("madurai-1", "Madurai", "Tamil Nadu", Some("Madurai"), 5.6, 6.0, 9.9252, 78.1198, 78, 3700, 6300000),
    site("coimbatore-1", "Coimbatore", "Tamil Nadu", Some("Coimbatore"), 5.5, 5.9, 11.0168, 76.9558, 76, 3500, 5900000),
    site("salem-1", "Salem", "Tamil Nadu", Some("Salem"), 5.7, 6.1, 11.6643, 78.1460, 79, 3900, 6600000),
    site("tirunelveli-1", "Tirunelveli", "Tamil Nadu", Some("Tirunelveli"), 5.8, 6.2, 8.7139, 77.7567, 80, 4000, 6800000),
    site("bangalore-1", "Bangalore", "Karnataka", Some("Bangalore Urban"), 5.5, 5.9, 12.9716, 77.5946, 76, 3500, 5900000),
    site("tumkur-1", "Tumkur", "Karnataka", Some("Tumkur"), 5.6, 6.0, 13.3379, 77.1173, 78, 3700, 6300000),
    site("kolar-1", "Kolar", "Karnataka", Some("Kolar"), 5.7, 6.1, 13.1357, 78.1326, 79, 3800, 6500000),
    site("kadapa-1", "Kadapa", "Andhra Pradesh", Some("Kadapa"), 5.8, 6.3, 14.4674, 78.8235, 82, 4200, 7100000),
    site("anantapur-1", "Anantapur", "Andhra Pradesh", Some("Anantapur"), 5.9, 6.4, 14.6819, 77.6006, 84, 4400, 7500000),
    site("hyderabad-1", "Hyderabad", "Telangana", Some("Hyderabad"), 5.6, 6.0, 17.3850, 78.4867, 77, 3600, 6100000),
    site("bhopal-1", "Bhopal", "Madhya Pradesh", Some("Bhopal"), 5.7, 6.2, 23.2599, 77.4126, 80, 4000, 6800000),
    site("neemuch-1", "Neemuch", "Madhya Pradesh", Some("Neemuch"), 5.9, 6.5, 24.4736, 74.8700, 84, 4400, 7500000),
    site("indore-1", "Indore", "Madhya Pradesh", Some("Indore"), 5.8, 6.3, 22.7196, 75.8577, 82, 4200, 7100000),
    site("ujjain-1", "Ujjain", "Madhya Pradesh", Some("Ujjain"), 5.7, 6.2, 23.1765, 75.7885, 80, 4000, 6800000),
    site("gwalior-1", "Gwalior", "Madhya Pradesh", Some("Gwalior"), 5.6, 6.1, 26.2183, 78.1828, 78, 3700, 6300000),
    site("lucknow-1", "Lucknow", "Uttar Pradesh", Some("Lucknow"), 5.3, 5.7, 26.8467, 80.9462, 73, 3100, 5300000),
    site("kolkata-1", "Kolkata", "West Bengal", Some("Kolkata"), 5.0, 5.3, 22.5726, 88.3639, 68, 2700, 4600000),
    site("siliguri-1", "Siliguri", "West Bengal", Some("Darjeeling"), 4.9, 5.2, 26.7271, 88.3953, 67, 2600, 4400000),
    site("asansol-1", "Asansol", "West Bengal", Some("Paschim Bardhaman"), 5.1, 5.4, 23.6889, 86.9661, 70, 2900, 4900000),
    site("durgapur-1", "Durgapur", "West Bengal", Some("Paschim Bardhaman"), 5.0, 5.3, 23.5204, 87.3119, 69, 2800, 4700000),
    site("darjeeling-1", "Darjeeling", "West Bengal", Some("Darjeeling"), 4.7, 5.0, 27.0410, 88.2663, 64, 2400, 4100000),
    site("patna-1", "Patna", "Bihar", Some("Patna"), 5.1, 5.4, 25.5941, 85.1376, 70, 2900, 4900000),
    site("amritsar-1", "Amritsar", "Punjab", Some("Amritsar"), 5.2, 5.6, 31.6340, 74.8723, 72, 3000, 5100000),
    site("gurgaon-1", "Gurgaon", "Haryana", Some("Gurgaon"), 5.3, 5.8, 28.4595, 77.0266, 74, 3200, 5400000),
    site("thiruvananthapuram-1", "Thiruvananthapuram", "Kerala", Some("Thiruvananthapuram"), 5.3, 5.7, 8.5241, 76.9366, 73, 3100, 5300000),
    site("guwahati-1", "Guwahati", "Assam", Some("Kamrup Metropolitan"), 4.8, 5.0, 26.1445, 91.7362, 63, 2300, 3900000),
    site("leh-1", "Leh", "Ladakh", Some("Leh"), 5.9, 6.5, 34.1526, 77.5771, 85, 4500, 7700000),
    site("raipur-1", "Raipur", "Chhattisgarh", Some("Raipur"), 5.5, 6.0, 21.2514, 81.6296, 77, 3600, 6100000),
    site("bhubaneswar-1", "Bhubaneswar", "Odisha", Some("Khordha"), 5.3, 5.7, 20.2961, 85.8245, 74, 3200, 5400000),
];

impl From<&Site> for LocationRecord {
    fn from(s: &Site) -> Self {
        LocationRecord {
            id: s.id.to_string(),
            name: s.name.to_string(),
            state: s.state.to_string(),
            district: s.district.map(str::to_string),
            latitude: Some(s.latitude),
            longitude: Some(s.longitude),
            ghi: Some(s.ghi),
            dni: Some(s.dni),
            solar_score: Some(s.solar_score),
            capacity_mw: Some(s.capacity_mw),
            generation_mwh: Some(s.generation_mwh),
            ..Default::default()
        }
    }
}

/// Raw catalog records; monthly projections are left for the deriver.
pub fn catalog() -> Vec<LocationRecord> {
    SITES.iter().map(LocationRecord::from).collect()
}

/// Example rows offered as an import template.
pub const SAMPLE_IMPORT_CSV: &str = "name,state,district,ghi,dni,latitude,longitude
Chennai,Tamil Nadu,Chennai,5.8,6.2,13.0827,80.2707
Coimbatore,Tamil Nadu,Coimbatore,5.6,5.9,11.0168,76.9558
Bengaluru,Karnataka,Bengaluru Urban,5.5,5.8,12.9716,77.5946
Hyderabad,Telangana,Hyderabad,5.9,6.1,17.385,78.4867
Jaipur,Rajasthan,Jaipur,6.2,6.5,26.9124,75.7873
";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_unique() {
        let records = catalog();
        let ids: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), records.len());
    }

    #[test]
    fn test_catalog_values_in_domain_range() {
        for r in catalog() {
            let (ghi, dni) = (r.ghi.unwrap(), r.dni.unwrap());
            assert!((3.5..=7.0).contains(&ghi), "{} ghi {}", r.id, ghi);
            assert!((4.0..=7.5).contains(&dni), "{} dni {}", r.id, dni);
            assert!(r.solar_score.unwrap() <= 100);
        }
    }

    #[test]
    fn test_jodhpur_entry() {
        let jodhpur = catalog().into_iter().find(|r| r.id == "jodhpur-1").unwrap();
        assert_eq!(jodhpur.solar_score, Some(88));
        assert_eq!(jodhpur.capacity_mw, Some(5000));
        assert!(jodhpur.monthly_data.is_none());
    }
}
