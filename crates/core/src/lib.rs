pub mod shared {
    pub mod bounding_box;
    pub mod camera;
    pub mod config;
    pub mod constants;
    pub mod frame;
}

pub mod detection {
    pub mod domain {
        pub mod detected_face;
        pub mod face_detector;
    }
    pub mod infrastructure;
}

pub mod analysis {
    pub mod domain {
        pub mod frame_analyzer;
        pub mod frame_context;
        pub mod notice;
        pub mod overlay_transform;
    }
}

pub mod overlay {
    pub mod domain {
        pub mod overlay_annotation;
        pub mod overlay_state;
        pub mod overlay_surface;
    }
    pub mod infrastructure;
}

pub mod notification {
    pub mod domain {
        pub mod notification_debouncer;
    }
}

pub mod pipeline {
    pub mod capture_gate;
    pub mod frame_submitter;
    pub mod latest_slot;
    pub mod liveness_session;
    pub mod pipeline_logger;
    pub mod ui_sink;

    pub mod infrastructure {
        pub mod frame_analysis_worker;
    }
}
