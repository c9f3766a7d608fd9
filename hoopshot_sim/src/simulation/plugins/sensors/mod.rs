pub mod plane_detection;
