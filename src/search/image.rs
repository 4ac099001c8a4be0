//! Image search orchestration
//!
//! Decomposes an uploaded image into one whole-image search plus zero or
//! more per-face sub-searches. Every sub-search is fault-isolated: a
//! timeout or failure in one never aborts the request or its siblings.

use crate::faces::{crop_to_box, encode_jpeg, BoundingBox, FaceDetector};
use crate::filters::filter_social;
use crate::network::{ProviderClient, ProviderError};
use crate::results::{normalize_image, FaceSearchOutcome, ImageOutcome, ImageSearchResponse};
use futures::stream::{self, StreamExt};
use image::DynamicImage;
use std::sync::Arc;
use tracing::{debug, warn};

/// Per-request switches for the image search path
#[derive(Debug, Clone, Copy)]
pub struct ImageSearchOptions {
    pub search_faces: bool,
    pub search_social: bool,
}

impl Default for ImageSearchOptions {
    fn default() -> Self {
        Self {
            search_faces: true,
            search_social: true,
        }
    }
}

/// Orchestrates whole-image and per-face reverse searches
pub struct ImageSearch {
    client: Arc<ProviderClient>,
    detector: Arc<dyn FaceDetector>,
    max_concurrent_faces: usize,
}

impl ImageSearch {
    pub fn new(
        client: Arc<ProviderClient>,
        detector: Arc<dyn FaceDetector>,
        max_concurrent_faces: usize,
    ) -> Self {
        Self {
            client,
            detector,
            max_concurrent_faces: max_concurrent_faces.max(1),
        }
    }

    /// Run the whole-image search plus optional per-face sub-searches.
    /// Always produces a response; failures are embedded where they occurred.
    pub async fn search(
        &self,
        image_bytes: &[u8],
        options: ImageSearchOptions,
    ) -> ImageSearchResponse {
        let standard_results = self.lookup(image_bytes, options.search_social).await;

        let face_results = if options.search_faces {
            Some(self.search_faces(image_bytes, options.search_social).await)
        } else {
            None
        };

        ImageSearchResponse {
            standard_results,
            face_results,
        }
    }

    /// One provider sub-search: invoke, normalize, social-filter if requested.
    async fn lookup(&self, image: &[u8], social: bool) -> ImageOutcome {
        let outcome = match self.client.reverse_image(image).await {
            Ok(payload) => normalize_image(payload),
            Err(ProviderError::Timeout) => {
                warn!("reverse image lookup timed out");
                ImageOutcome::failed(format!(
                    "Image search timed out after {} seconds",
                    self.client.image_timeout_secs()
                ))
            }
            Err(err) => {
                warn!("reverse image lookup failed: {}", err);
                ImageOutcome::failed(format!("Image search failed: {}", err))
            }
        };

        if social {
            filter_social(outcome)
        } else {
            outcome
        }
    }

    /// Detect faces and run one sub-search per region. Outcomes are
    /// gathered in detection order regardless of completion order.
    async fn search_faces(&self, image_bytes: &[u8], social: bool) -> Vec<FaceSearchOutcome> {
        // Decoding is only needed for face detection; a decode failure must
        // not block the whole-image search path.
        let image = match image::load_from_memory(image_bytes) {
            Ok(image) => image,
            Err(err) => {
                warn!("failed to decode image for face detection: {}", err);
                return Vec::new();
            }
        };

        let gray = image.to_luma8();
        let regions = self.detector.detect(gray.as_raw(), gray.width(), gray.height());
        debug!("detected {} face regions", regions.len());

        stream::iter(regions.into_iter().enumerate())
            .map(|(index, region)| self.face_lookup(&image, index, region, social))
            .buffered(self.max_concurrent_faces)
            .collect()
            .await
    }

    /// Crop one face region, re-encode it, and run its own sub-search.
    async fn face_lookup(
        &self,
        image: &DynamicImage,
        index: usize,
        region: BoundingBox,
        social: bool,
    ) -> FaceSearchOutcome {
        let results = match crop_to_box(image, &region).and_then(|crop| encode_jpeg(&crop)) {
            Ok(bytes) => self.lookup(&bytes, social).await,
            Err(err) => {
                warn!("failed to prepare crop for face {}: {}", index, err);
                ImageOutcome::failed(format!("Image search failed: {}", err))
            }
        };

        FaceSearchOutcome {
            face_index: index,
            position: region,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OutgoingSettings, ProviderSettings};
    use crate::filters::NO_SOCIAL_RESULTS;
    use crate::results::ImageEntry;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine as _;
    use image::RgbImage;
    use serde_json::json;
    use std::io::Cursor;
    use std::time::Duration;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Detector returning a fixed set of regions
    struct StubDetector(Vec<BoundingBox>);

    impl FaceDetector for StubDetector {
        fn detect(&self, _gray: &[u8], _width: u32, _height: u32) -> Vec<BoundingBox> {
            self.0.clone()
        }
    }

    /// Detector that must never be reached
    struct PanicDetector;

    impl FaceDetector for PanicDetector {
        fn detect(&self, _gray: &[u8], _width: u32, _height: u32) -> Vec<BoundingBox> {
            panic!("face detector must not be invoked");
        }
    }

    fn test_png() -> Vec<u8> {
        let img = RgbImage::from_fn(64, 64, |x, y| {
            image::Rgb([(x * 4) as u8, (y * 4) as u8, 99])
        });
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
            .unwrap();
        bytes
    }

    /// Base64 of the JPEG crop the orchestrator will send for a region
    fn crop_content(png: &[u8], region: &BoundingBox) -> String {
        let image = image::load_from_memory(png).unwrap();
        let crop = crop_to_box(&image, region).unwrap();
        BASE64.encode(encode_jpeg(&crop).unwrap())
    }

    fn image_search_for(server: &MockServer, detector: Arc<dyn FaceDetector>) -> ImageSearch {
        let provider = ProviderSettings {
            base_url: server.uri(),
            api_key: "test-key".to_string(),
            image_timeout_secs: 1,
            ..ProviderSettings::default()
        };
        let client =
            ProviderClient::with_settings(&provider, &OutgoingSettings::default()).unwrap();
        ImageSearch::new(Arc::new(client), detector, 4)
    }

    fn social_payload() -> serde_json::Value {
        json!({"image_results": [
            {"title": "Profile", "link": "https://instagram.com/p/1", "source": "Instagram"}
        ]})
    }

    #[tokio::test]
    async fn test_faces_disabled_skips_detector_and_omits_face_results() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(social_payload()))
            .mount(&server)
            .await;

        let search = image_search_for(&server, Arc::new(PanicDetector));
        let response = search
            .search(
                &test_png(),
                ImageSearchOptions {
                    search_faces: false,
                    search_social: false,
                },
            )
            .await;

        assert!(response.face_results.is_none());
        match response.standard_results {
            ImageOutcome::Entries(entries) => assert_eq!(entries.len(), 1),
            other => panic!("expected entries, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_zero_faces_yields_empty_sequence() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(social_payload()))
            .mount(&server)
            .await;

        let search = image_search_for(&server, Arc::new(StubDetector(vec![])));
        let response = search.search(&test_png(), ImageSearchOptions::default()).await;

        assert_eq!(response.face_results, Some(vec![]));
    }

    #[tokio::test]
    async fn test_face_outcomes_follow_detection_order() {
        let server = MockServer::start().await;
        let png = test_png();

        let regions = vec![
            BoundingBox { top: 0, right: 20, bottom: 20, left: 0 },
            BoundingBox { top: 30, right: 60, bottom: 60, left: 30 },
        ];

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(social_payload()))
            .mount(&server)
            .await;

        let search = image_search_for(&server, Arc::new(StubDetector(regions.clone())));
        let response = search.search(&png, ImageSearchOptions::default()).await;

        let face_results = response.face_results.unwrap();
        assert_eq!(face_results.len(), 2);
        assert_eq!(face_results[0].face_index, 0);
        assert_eq!(face_results[0].position, regions[0]);
        assert_eq!(face_results[1].face_index, 1);
        assert_eq!(face_results[1].position, regions[1]);
    }

    #[tokio::test]
    async fn test_face_without_social_results_gets_sentinel_only() {
        let server = MockServer::start().await;
        let png = test_png();

        let regions = vec![
            BoundingBox { top: 0, right: 20, bottom: 20, left: 0 },
            BoundingBox { top: 30, right: 60, bottom: 60, left: 30 },
        ];

        // Face 0 resolves to a social profile, face 1 to press coverage only.
        Mock::given(method("GET"))
            .and(query_param("image_content", crop_content(&png, &regions[0])))
            .respond_with(ResponseTemplate::new(200).set_body_json(social_payload()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("image_content", crop_content(&png, &regions[1])))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "image_results": [{"title": "News", "source": "nytimes.com"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(social_payload()))
            .mount(&server)
            .await;

        let search = image_search_for(&server, Arc::new(StubDetector(regions)));
        let response = search.search(&png, ImageSearchOptions::default()).await;

        let face_results = response.face_results.unwrap();
        assert_eq!(face_results.len(), 2);
        match &face_results[0].results {
            ImageOutcome::Entries(entries) => {
                assert!(matches!(entries[0], ImageEntry::Result(_)))
            }
            other => panic!("expected entries, got {other:?}"),
        }
        assert_eq!(
            face_results[1].results,
            ImageOutcome::sentinel(NO_SOCIAL_RESULTS)
        );
    }

    #[tokio::test]
    async fn test_standard_timeout_leaves_face_results_intact() {
        let server = MockServer::start().await;
        let png = test_png();

        let region = BoundingBox { top: 0, right: 32, bottom: 32, left: 0 };

        // The whole-image lookup hangs past the 1s timeout; the face crop
        // lookup answers promptly.
        Mock::given(method("GET"))
            .and(query_param("image_content", BASE64.encode(&png)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(social_payload())
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(social_payload()))
            .mount(&server)
            .await;

        let search = image_search_for(&server, Arc::new(StubDetector(vec![region])));
        let response = search.search(&png, ImageSearchOptions::default()).await;

        assert_eq!(
            response.standard_results,
            ImageOutcome::failed("Image search timed out after 1 seconds")
        );

        let face_results = response.face_results.unwrap();
        assert_eq!(face_results.len(), 1);
        assert!(matches!(face_results[0].results, ImageOutcome::Entries(_)));
    }

    #[tokio::test]
    async fn test_face_timeout_does_not_affect_siblings() {
        let server = MockServer::start().await;
        let png = test_png();

        let regions = vec![
            BoundingBox { top: 0, right: 20, bottom: 20, left: 0 },
            BoundingBox { top: 30, right: 60, bottom: 60, left: 30 },
        ];

        Mock::given(method("GET"))
            .and(query_param("image_content", crop_content(&png, &regions[0])))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(social_payload())
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(social_payload()))
            .mount(&server)
            .await;

        let search = image_search_for(&server, Arc::new(StubDetector(regions)));
        let response = search.search(&png, ImageSearchOptions::default()).await;

        let face_results = response.face_results.unwrap();
        assert_eq!(
            face_results[0].results,
            ImageOutcome::failed("Image search timed out after 1 seconds")
        );
        assert!(matches!(face_results[1].results, ImageOutcome::Entries(_)));
        assert!(matches!(response.standard_results, ImageOutcome::Entries(_)));
    }

    #[tokio::test]
    async fn test_undecodable_image_still_searches_whole_image() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(social_payload()))
            .mount(&server)
            .await;

        let search = image_search_for(&server, Arc::new(PanicDetector));
        let response = search
            .search(b"definitely not an image", ImageSearchOptions::default())
            .await;

        // Whole-image search ran; face detection degraded to no faces.
        assert!(matches!(response.standard_results, ImageOutcome::Entries(_)));
        assert_eq!(response.face_results, Some(vec![]));
    }
}
