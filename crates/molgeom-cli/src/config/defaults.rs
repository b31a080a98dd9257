use molgeom::core::io::output::DEFAULT_HISTOGRAM_PRECISION;

pub struct DefaultsConfig {
    pub histogram_precision: usize,
    pub labels_extension: &'static str,
    pub distance_table: &'static str,
    pub angle_table: &'static str,
    pub torsion_table: &'static str,
    pub single_distance_table: &'static str,
    pub single_angle_table: &'static str,
    pub single_torsion_table: &'static str,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            histogram_precision: DEFAULT_HISTOGRAM_PRECISION,
            labels_extension: "train",
            distance_table: "dists.dat",
            angle_table: "angs.dat",
            torsion_table: "tors.dat",
            single_distance_table: "distcml.dat",
            single_angle_table: "angcml.dat",
            single_torsion_table: "torscml.dat",
        }
    }
}
