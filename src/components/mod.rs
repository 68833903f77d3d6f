pub mod camera_view;
