// Algorithms for `antpath_challenges::weighted_path`
pub mod ant_colony;
