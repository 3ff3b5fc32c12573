use crate::{Error, StationRecord, Stations};

impl Stations {
    /// The station nearest to the given position, with its distance in metres.
    /// Stations without usable coordinates are skipped.
    pub fn closest(&self, latitude: f64, longitude: f64) -> Result<(&StationRecord, f64), Error> {
        let mut closest: Option<(&StationRecord, f64)> = None;
        for station in self.iter() {
            let (lat, lon) = match station.coordinates() {
                Some(c) => c,
                None => continue,
            };

            // NOTE: Flat earth approximation, the stations all lie within one city.
            let distance = distance_meters(latitude, longitude, lat, lon);
            match &closest {
                Some((_, closest_distance)) => {
                    if &distance < closest_distance {
                        closest = Some((station, distance));
                    }
                }
                None => closest = Some((station, distance)),
            }
        }

        closest.ok_or(Error::NotFound)
    }
}

fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let x = deg2rad(lon1 - lon2) * f64::cos(deg2rad((lat1 + lat2) / 2.0));
    let y = deg2rad(lat1 - lat2);
    6371000.0 * f64::sqrt(x * x + y * y)
}

fn deg2rad(degrees: f64) -> f64 {
    degrees * (std::f64::consts::PI / 180.0)
}
