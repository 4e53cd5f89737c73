//! Demo records loaded at startup.
//!
//! Also used as fixtures by the store and HTTP tests.

use chrono::{DateTime, Duration, Utc};

use super::model::{Attachment, Classification, MissionType, Record, ReportStatus};

/// The three seed records, dated relative to `now`
pub fn sample_records(now: DateTime<Utc>) -> Vec<Record> {
    vec![enduring_shield(now), iron_sentinel(now), northern_viking(now)]
}

fn attachments(
    aar_id: &str,
    uploaded_at: DateTime<Utc>,
    files: &[(&str, &str, u64, &str)],
) -> Vec<Attachment> {
    files
        .iter()
        .map(|(id, filename, file_size, content_type)| Attachment {
            id: id.to_string(),
            aar_id: aar_id.to_string(),
            filename: filename.to_string(),
            storage_key: format!("aars/{}/attachments/{}", aar_id, filename),
            file_size: *file_size,
            content_type: content_type.to_string(),
            uploaded_at,
        })
        .collect()
}

fn enduring_shield(now: DateTime<Utc>) -> Record {
    let id = "AAR-20251005-0001";
    let at = now - Duration::days(32);
    Record {
        id: id.to_string(),
        classification: Classification::Unclassified,
        operation_name: "Operation Enduring Shield".into(),
        dtg: "051200ZOCT25".into(),
        unit_designation: "3rd Infantry Division, 2nd Brigade Combat Team".into(),
        mission_type: MissionType::Training.into(),
        location: "Fort Stewart, GA".into(),
        duration_start: "051200ZOCT25".into(),
        duration_end: "051800ZOCT25".into(),
        personnel_count: 450,
        executive_summary: "Battalion-level combined arms training exercise focusing on rapid deployment and sustainment operations. Exercise included live-fire maneuvers, logistical coordination, and interoperability drills with supporting units. All training objectives were met with no significant safety incidents.".into(),
        key_events: "0600: Unit assembly and mission brief\n0800: Movement to training area\n1000: Live-fire exercise commenced\n1400: Tactical maneuver phase\n1700: After action review\n1800: Stand down".into(),
        what_went_well: "Communications between units exceeded expectations. Logistical support was timely and effective. All personnel demonstrated proficiency in basic combat tasks. Leadership at the platoon level showed strong tactical decision-making.".into(),
        needs_improvement: "Coordination with supporting artillery units needs refinement. Some delays in medical evacuation procedures were noted. Night operations revealed gaps in night vision equipment availability.".into(),
        lessons_learned: "Pre-coordination with supporting elements is critical for mission success. Additional training on CASEVAC procedures is required. Equipment readiness checks must be more thorough before operations.".into(),
        recommendations: "Increase frequency of integrated training with artillery and air support. Procure additional night vision devices. Conduct quarterly CASEVAC refresher training for all personnel.".into(),
        commanders_assessment: "Overall excellent performance by the battalion. Unit is combat-ready and capable of executing assigned missions. Recommend continued emphasis on combined arms integration.".into(),
        prepared_by: "CPT John Smith, S3 Operations Officer".into(),
        reviewed_by: "LTC Michael Johnson, Battalion Commander".into(),
        status: ReportStatus::Approved,
        attachments: attachments(
            id,
            at,
            &[
                ("att-001", "training_photo_001.jpg", 2_048_576, "image/jpeg"),
                ("att-002", "sitrep.pdf", 524_288, "application/pdf"),
                (
                    "att-003",
                    "equipment_status.xlsx",
                    102_400,
                    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
                ),
            ],
        ),
        submitted_date: at,
        created_at: at,
        updated_at: at,
    }
}

fn iron_sentinel(now: DateTime<Utc>) -> Record {
    let id = "AAR-20250920-0002";
    let at = now - Duration::days(47);
    Record {
        id: id.to_string(),
        classification: Classification::Unclassified,
        operation_name: "Exercise Iron Sentinel".into(),
        dtg: "201430ZSEP25".into(),
        unit_designation: "Marine Expeditionary Unit 26".into(),
        mission_type: MissionType::Security.into(),
        location: "Camp Pendleton, CA / Pacific Ocean".into(),
        duration_start: "200600ZSEP25".into(),
        duration_end: "221800ZSEP25".into(),
        personnel_count: 2200,
        executive_summary: "Multi-national training exercise with allied forces practicing amphibious assault operations and humanitarian assistance/disaster relief scenarios. Exercise included naval surface warfare, air-ground integration, and logistics over the shore operations. Participating nations included Japan, Australia, and South Korea.".into(),
        key_events: "Day 1: Embarkation and movement to sea\nDay 2: Amphibious rehearsal\nDay 3: Full-scale amphibious assault with live-fire\nDay 4: HA/DR scenario and medical operations\nDay 5: Debarkation and equipment accountability".into(),
        what_went_well: "Excellent coordination with allied forces. Communications interoperability exceeded previous exercises. Aviation support was responsive and effective. Medical staff demonstrated outstanding capability in mass casualty scenarios.".into(),
        needs_improvement: "Landing craft scheduling caused minor delays. Some language barriers with partner nations during complex operations. Weather monitoring and contingency planning needs enhancement.".into(),
        lessons_learned: "Importance of liaison officers embedded with partner forces. Need for redundant communications systems. Value of cultural awareness training prior to multinational exercises.".into(),
        recommendations: "Increase number of liaison officers for future multinational exercises. Develop standardized visual signals for operations with language barriers. Conduct additional weather-related contingency training.".into(),
        commanders_assessment: "MEU demonstrated exceptional operational capability and readiness. Integration with allied forces was seamless. Unit is fully prepared for real-world contingency operations.".into(),
        prepared_by: "MAJ Sarah Williams, MEU Operations Officer".into(),
        reviewed_by: "COL Robert Davis, MEU Commander".into(),
        status: ReportStatus::Approved,
        attachments: attachments(
            id,
            at,
            &[
                ("att-004", "amphibious_ops_photo_001.jpg", 3_145_728, "image/jpeg"),
                ("att-005", "tactical_map.png", 1_572_864, "image/png"),
                ("att-006", "exercise_video.mp4", 52_428_800, "video/mp4"),
                ("att-007", "allied_coordination_plan.pdf", 819_200, "application/pdf"),
                ("att-008", "medical_ops_photo.jpg", 2_621_440, "image/jpeg"),
            ],
        ),
        submitted_date: at,
        created_at: at,
        updated_at: at,
    }
}

fn northern_viking(now: DateTime<Utc>) -> Record {
    let id = "AAR-20250815-0004";
    let at = now - Duration::days(83);
    Record {
        id: id.to_string(),
        classification: Classification::Unclassified,
        operation_name: "Exercise Northern Viking".into(),
        dtg: "151500ZAUG25".into(),
        unit_designation: "10th Mountain Division, 1st Brigade".into(),
        mission_type: MissionType::Training.into(),
        location: "Fort Drum, NY / Adirondack Mountains".into(),
        duration_start: "150600ZAUG25".into(),
        duration_end: "171800ZAUG25".into(),
        personnel_count: 3500,
        executive_summary: "Brigade-level cold weather and mountain warfare training exercise. Focused on operations in austere, high-altitude environments with emphasis on cold weather survival, mountain mobility, and logistics in challenging terrain. Exercise prepared unit for potential deployment to arctic regions.".into(),
        key_events: "Day 1: Movement to mountain training area and cold weather acclimatization\nDay 2: Mountain mobility training and technical rope operations\nDay 3: Cold weather survival and bivouac operations\nDay 4: Brigade tactical exercise with opposing force".into(),
        what_went_well: "Soldiers demonstrated excellent cold weather discipline. Mountain warfare skills improved significantly. Logistics chain functioned effectively despite challenging terrain. Leadership at all levels adapted well to austere conditions.".into(),
        needs_improvement: "Some cold weather equipment shortages were identified. Communications in mountainous terrain remains challenging. Additional medical personnel training for cold weather injuries needed.".into(),
        lessons_learned: "Importance of proper cold weather equipment maintenance. Need for specialized communications equipment for mountain operations. Value of pre-deployment cold weather training for personnel unfamiliar with arctic conditions.".into(),
        recommendations: "Procure additional cold weather equipment sets. Invest in mountainous terrain communications solutions. Establish cold weather injury prevention program. Conduct annual cold weather refresher training.".into(),
        commanders_assessment: "Brigade performed exceptionally well in challenging conditions. Unit is prepared for cold weather and mountain operations. Soldiers demonstrated resilience and adaptability.".into(),
        prepared_by: "CPT Emily Rodriguez, Brigade S3 Air".into(),
        reviewed_by: "COL James Anderson, Brigade Commander".into(),
        status: ReportStatus::Approved,
        attachments: attachments(
            id,
            at,
            &[
                ("att-011", "mountain_training_photo.jpg", 2_621_440, "image/jpeg"),
                ("att-012", "cold_weather_procedures.pdf", 614_400, "application/pdf"),
            ],
        ),
        submitted_date: at,
        created_at: at,
        updated_at: at,
    }
}
