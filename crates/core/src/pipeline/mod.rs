pub mod check_face_use_case;
