//! Coarse landmass outlines drawn under the graticule.
//!
//! Points are `(latitude, longitude)` in degrees. Outlines are low resolution
//! (a few degrees per vertex) and only meant for orientation.

pub struct Landmass {
    pub name: &'static str,
    /// Where the name is drawn.
    pub label: (f64, f64),
    pub outline: &'static [(f64, f64)],
}

impl Landmass {
    /// Even-odd ray cast along the parallel through `latitude`.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        let pts = self.outline;
        let mut inside = false;
        let mut j = pts.len() - 1;
        for i in 0..pts.len() {
            let (lat_i, lng_i) = pts[i];
            let (lat_j, lng_j) = pts[j];
            if (lat_i > latitude) != (lat_j > latitude) {
                let cross = lng_i + (latitude - lat_i) * (lng_j - lng_i) / (lat_j - lat_i);
                if longitude < cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

/// Name of the landmass under a point, if any.
pub fn landmass_at(latitude: f64, longitude: f64) -> Option<&'static str> {
    LANDMASSES
        .iter()
        .find(|land| land.contains(latitude, longitude))
        .map(|land| land.name)
}

pub static LANDMASSES: &[Landmass] = &[
    Landmass {
        name: "North America",
        label: (45.0, -100.0),
        outline: &[
            (71.0, -156.0), (70.0, -141.0), (69.0, -133.0), (68.0, -115.0), (67.0, -95.0),
            (62.0, -93.0), (58.0, -94.0), (55.0, -82.0), (51.0, -80.0), (60.0, -78.0),
            (62.0, -74.0), (58.0, -68.0), (60.0, -64.0), (53.0, -56.0), (47.0, -53.0),
            (45.0, -61.0), (44.0, -66.0), (41.0, -70.0), (35.0, -76.0), (30.0, -81.0),
            (25.0, -80.0), (30.0, -84.0), (30.0, -89.0), (29.0, -95.0), (26.0, -97.0),
            (21.0, -97.0), (19.0, -96.0), (18.0, -94.0), (21.0, -90.0), (21.0, -87.0),
            (16.0, -88.0), (15.0, -83.0), (11.0, -84.0), (9.0, -79.0), (8.0, -77.0),
            (7.0, -80.0), (9.0, -85.0), (13.0, -88.0), (15.0, -93.0), (16.0, -95.0),
            (20.0, -105.0), (23.0, -106.0), (31.0, -113.0), (23.0, -110.0), (28.0, -115.0),
            (32.0, -117.0), (34.0, -120.0), (40.0, -124.0), (46.0, -124.0), (49.0, -125.0),
            (55.0, -131.0), (58.0, -137.0), (60.0, -146.0), (59.0, -152.0), (57.0, -157.0),
            (55.0, -164.0), (60.0, -165.0), (64.0, -166.0), (66.0, -164.0), (68.0, -166.0),
        ],
    },
    Landmass {
        name: "South America",
        label: (-12.0, -58.0),
        outline: &[
            (12.0, -72.0), (11.0, -64.0), (10.0, -61.0), (6.0, -57.0), (4.0, -51.0),
            (0.0, -50.0), (-2.0, -44.0), (-5.0, -36.0), (-8.0, -35.0), (-13.0, -39.0),
            (-18.0, -39.0), (-23.0, -43.0), (-25.0, -48.0), (-29.0, -49.0), (-34.0, -53.0),
            (-35.0, -57.0), (-39.0, -57.0), (-41.0, -63.0), (-45.0, -66.0), (-50.0, -68.0),
            (-55.0, -67.0), (-54.0, -72.0), (-50.0, -75.0), (-42.0, -74.0), (-37.0, -73.0),
            (-30.0, -71.0), (-20.0, -70.0), (-15.0, -75.0), (-6.0, -81.0), (-3.0, -80.0),
            (1.0, -80.0), (4.0, -77.0), (8.0, -77.0),
        ],
    },
    Landmass {
        name: "Eurasia",
        label: (55.0, 90.0),
        outline: &[
            (36.0, -9.0), (43.0, -9.0), (43.5, -1.5), (47.5, -3.0), (48.6, -4.7),
            (49.5, 0.0), (51.0, 2.0), (53.5, 6.0), (54.5, 8.5), (57.5, 8.5),
            (55.5, 12.5), (54.2, 14.0), (54.8, 19.0), (57.0, 21.0), (59.5, 24.0),
            (60.5, 29.0), (60.5, 22.0), (65.5, 25.0), (65.5, 22.0), (63.0, 18.0),
            (59.5, 18.5), (56.0, 13.0), (58.5, 11.0), (58.0, 6.5), (62.0, 5.0),
            (66.0, 13.0), (70.0, 19.0), (71.0, 26.0), (70.0, 32.0), (68.5, 41.0),
            (66.5, 44.0), (68.5, 55.0), (69.0, 67.0), (73.0, 70.0), (72.5, 80.0),
            (76.0, 95.0), (77.5, 105.0), (74.0, 113.0), (72.5, 128.0), (72.0, 140.0),
            (70.0, 160.0), (70.0, 170.0), (66.0, 180.0), (62.0, 179.0), (60.0, 170.0),
            (59.0, 163.0), (56.0, 162.0), (51.0, 156.5), (57.0, 156.0), (59.5, 152.0),
            (59.0, 143.0), (54.0, 137.0), (52.5, 141.0), (47.0, 139.0), (43.0, 135.0),
            (41.0, 130.0), (38.5, 128.5), (35.0, 129.0), (34.7, 126.3), (38.0, 125.0),
            (40.0, 122.0), (39.0, 118.0), (37.0, 119.0), (35.0, 120.0), (31.0, 122.0),
            (27.0, 120.0), (23.0, 117.0), (22.0, 113.0), (21.5, 109.5), (19.0, 106.0),
            (17.0, 107.0), (12.0, 109.0), (8.8, 105.0), (10.3, 104.0), (13.3, 100.5),
            (10.0, 99.2), (7.0, 100.5), (1.3, 104.0), (3.0, 101.0), (8.0, 98.3),
            (16.0, 97.5), (16.0, 94.3), (21.0, 92.0), (22.0, 89.0), (20.0, 86.5),
            (16.0, 81.5), (10.0, 80.0), (8.0, 77.5), (13.0, 74.8), (19.0, 72.8),
            (22.5, 69.0), (25.3, 66.0), (25.5, 57.5), (22.5, 59.8), (17.0, 55.0),
            (13.0, 45.0), (15.5, 42.5), (21.0, 39.0), (28.0, 34.5), (30.0, 32.5),
            (31.3, 34.2), (33.5, 35.3), (36.5, 36.0), (36.5, 30.5), (37.0, 27.5),
            (40.0, 26.0), (38.0, 23.5), (36.5, 22.0), (40.0, 20.0), (42.5, 18.5),
            (45.5, 13.7), (44.0, 12.5), (41.5, 16.5), (40.0, 18.5), (38.0, 16.0),
            (40.0, 15.0), (42.0, 12.0), (44.2, 8.5), (43.3, 5.0), (41.5, 3.0),
            (39.0, 0.0), (36.7, -2.0), (36.0, -5.5), (37.0, -8.8),
        ],
    },
    Landmass {
        name: "Africa",
        label: (5.0, 20.0),
        outline: &[
            (35.0, -6.0), (37.0, 10.0), (33.0, 11.0), (30.0, 19.0), (31.0, 25.0),
            (31.0, 32.0), (28.0, 33.0), (22.0, 37.0), (15.0, 39.0), (12.0, 43.0),
            (11.0, 51.0), (2.0, 46.0), (-4.0, 40.0), (-10.0, 40.0), (-15.0, 41.0),
            (-20.0, 35.0), (-25.0, 35.0), (-34.0, 26.0), (-35.0, 20.0), (-30.0, 17.0),
            (-22.0, 14.0), (-17.0, 12.0), (-11.0, 14.0), (-6.0, 12.0), (-1.0, 9.0),
            (4.0, 9.0), (6.0, 1.0), (5.0, -5.0), (4.0, -8.0), (8.0, -13.0),
            (11.0, -16.0), (15.0, -17.0), (21.0, -17.0), (26.0, -15.0), (29.0, -10.0),
            (33.0, -8.0),
        ],
    },
    Landmass {
        name: "Australia",
        label: (-25.0, 134.0),
        outline: &[
            (-11.0, 142.0), (-17.0, 141.0), (-12.0, 136.0), (-12.0, 131.0), (-15.0, 129.0),
            (-14.0, 126.0), (-18.0, 122.0), (-21.0, 117.0), (-22.0, 114.0), (-26.0, 113.0),
            (-32.0, 115.0), (-35.0, 117.0), (-34.0, 123.0), (-32.0, 127.0), (-32.0, 133.0),
            (-35.0, 136.0), (-35.0, 139.0), (-38.0, 140.0), (-39.0, 146.0), (-37.0, 150.0),
            (-33.0, 152.0), (-28.0, 153.0), (-24.0, 152.0), (-19.0, 146.0), (-15.0, 145.0),
        ],
    },
    Landmass {
        name: "Greenland",
        label: (74.0, -41.0),
        outline: &[
            (83.0, -35.0), (82.0, -60.0), (78.0, -72.0), (76.0, -66.0), (70.0, -54.0),
            (64.0, -52.0), (60.0, -44.0), (65.0, -40.0), (70.0, -22.0), (76.0, -19.0),
            (81.0, -12.0),
        ],
    },
    Landmass {
        name: "Antarctica",
        label: (-80.0, 30.0),
        outline: &[
            (-78.0, -180.0), (-76.0, -150.0), (-73.0, -120.0), (-73.0, -90.0), (-70.0, -75.0),
            (-63.0, -57.0), (-72.0, -60.0), (-78.0, -40.0), (-71.0, -10.0), (-70.0, 20.0),
            (-68.0, 50.0), (-66.0, 80.0), (-66.0, 110.0), (-67.0, 140.0), (-71.0, 170.0),
            (-78.0, 180.0), (-90.0, 180.0), (-90.0, -180.0),
        ],
    },
    Landmass {
        name: "Great Britain",
        label: (54.0, -2.5),
        outline: &[
            (50.0, -5.0), (51.0, 1.0), (53.0, 0.0), (56.0, -2.0), (58.0, -3.0),
            (58.0, -5.0), (57.0, -6.0), (55.0, -5.0), (54.0, -3.0), (53.0, -4.0),
            (52.0, -5.0), (51.0, -3.0),
        ],
    },
    Landmass {
        name: "Iceland",
        label: (65.0, -19.0),
        outline: &[
            (66.0, -23.0), (66.0, -15.0), (64.0, -14.0), (63.0, -20.0), (64.0, -23.0),
        ],
    },
    Landmass {
        name: "Japan",
        label: (37.0, 138.0),
        outline: &[
            (31.0, 130.0), (34.0, 131.0), (35.0, 135.0), (35.0, 140.0), (38.0, 141.0),
            (40.0, 142.0), (42.0, 143.0), (43.0, 145.0), (45.0, 142.0), (43.0, 141.0),
            (41.5, 140.0), (40.0, 140.0), (37.0, 137.0), (35.0, 133.0), (33.0, 129.0),
        ],
    },
    Landmass {
        name: "Madagascar",
        label: (-19.0, 46.5),
        outline: &[
            (-12.0, 49.0), (-16.0, 50.0), (-25.0, 47.0), (-25.0, 44.0), (-20.0, 44.0),
            (-16.0, 44.0),
        ],
    },
    Landmass {
        name: "Borneo",
        label: (1.0, 114.0),
        outline: &[
            (7.0, 117.0), (1.0, 119.0), (-4.0, 116.0), (-3.0, 111.0), (1.0, 109.0),
            (4.0, 114.0),
        ],
    },
    Landmass {
        name: "Sumatra",
        label: (0.0, 101.0),
        outline: &[
            (5.0, 95.0), (2.0, 99.0), (-3.0, 106.0), (-6.0, 105.0), (-2.0, 100.0),
            (2.0, 97.0),
        ],
    },
    Landmass {
        name: "New Zealand",
        label: (-41.0, 172.5),
        outline: &[
            (-35.0, 173.0), (-41.0, 176.0), (-46.0, 171.0), (-44.0, 168.0), (-41.0, 172.0),
        ],
    },
];
