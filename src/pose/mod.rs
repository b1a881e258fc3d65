pub mod classifier;

pub use classifier::{
    classify, FaceLandmarks, HeadDirection, LandmarkPoint, PoseClassification, PoseThresholds,
};
