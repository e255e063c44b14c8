mod dispatch;

pub use dispatch::{
    close_surface, notify_review_channel, notify_submitter, post_review_request, warn_reviewer,
};
