//! Reference city coordinates.
//!
//! Display-only: a city selects nothing in the computation. The coordinates
//! are what a caller would key a weather request on.

/// Region, city name, latitude, longitude.
pub const CITIES: &[(&str, &str, f64, f64)] = &[
    ("Metro", "Delhi", 28.61, 77.20),
    ("Metro", "Mumbai", 19.07, 72.87),
    ("Metro", "Chennai", 13.08, 80.27),
    ("Metro", "Kolkata", 22.57, 88.36),
    ("Metro", "Bengaluru", 12.97, 77.59),
    ("Metro", "Hyderabad", 17.38, 78.48),
    ("Major", "Pune", 18.52, 73.85),
    ("Major", "Ahmedabad", 23.03, 72.58),
    ("Major", "Jaipur", 26.91, 75.79),
    ("Major", "Lucknow", 26.85, 80.95),
    ("Major", "Kanpur", 26.45, 80.33),
    ("Major", "Nagpur", 21.15, 79.09),
    ("Major", "Indore", 22.72, 75.86),
    ("Major", "Bhopal", 23.26, 77.41),
    ("Major", "Patna", 25.59, 85.14),
    ("Major", "Ranchi", 23.34, 85.31),
    ("South", "Visakhapatnam", 17.68, 83.21),
    ("South", "Vijayawada", 16.51, 80.64),
    ("South", "Tirupati", 13.63, 79.42),
    ("South", "Coimbatore", 11.01, 76.96),
    ("South", "Madurai", 9.93, 78.12),
    ("South", "Salem", 11.66, 78.14),
    ("South", "Trichy", 10.79, 78.70),
    ("South", "Warangal", 17.98, 79.60),
    ("West", "Surat", 21.17, 72.83),
    ("West", "Vadodara", 22.30, 73.20),
    ("West", "Rajkot", 22.30, 70.80),
    ("West", "Udaipur", 24.58, 73.68),
    ("West", "Jodhpur", 26.24, 73.02),
    ("North", "Amritsar", 31.63, 74.87),
    ("North", "Chandigarh", 30.74, 76.79),
    ("North", "Dehradun", 30.31, 78.03),
    ("North", "Shimla", 31.10, 77.17),
    ("North", "Jammu", 32.73, 74.87),
    ("East & North-East", "Bhubaneswar", 20.30, 85.82),
    ("East & North-East", "Cuttack", 20.46, 85.88),
    ("East & North-East", "Durgapur", 23.55, 87.29),
    ("East & North-East", "Siliguri", 26.72, 88.43),
    ("East & North-East", "Guwahati", 26.14, 91.74),
    ("East & North-East", "Shillong", 25.57, 91.88),
    ("Kerala", "Kochi", 9.97, 76.28),
    ("Kerala", "Thiruvananthapuram", 8.52, 76.93),
    ("Kerala", "Kozhikode", 11.26, 75.78),
];

/// Case-insensitive lookup returning `(latitude, longitude)`.
pub fn find(name: &str) -> Option<(f64, f64)> {
    let name = name.trim();
    CITIES
        .iter()
        .find(|(_, city, _, _)| city.eq_ignore_ascii_case(name))
        .map(|&(_, _, lat, lon)| (lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(find("delhi"), Some((28.61, 77.20)));
        assert_eq!(find(" Kochi "), Some((9.97, 76.28)));
        assert_eq!(find("Atlantis"), None);
    }

    #[test]
    fn names_are_unique() {
        for (i, (_, a, _, _)) in CITIES.iter().enumerate() {
            assert!(
                CITIES[i + 1..].iter().all(|(_, b, _, _)| !a.eq_ignore_ascii_case(b)),
                "duplicate city {a}"
            );
        }
    }

    #[test]
    fn coordinates_are_in_india() {
        for &(_, city, lat, lon) in CITIES {
            assert!((6.0..=37.0).contains(&lat), "{city} latitude {lat}");
            assert!((68.0..=98.0).contains(&lon), "{city} longitude {lon}");
        }
    }
}
