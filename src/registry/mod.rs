//! Static dataset registry.
//!
//! Maps symbolic dataset names to annotation/image paths. Names may carry a
//! `%N` suffix selecting N percent of the dataset's sampling weight, e.g.
//! `cambrian_737k%50` resolves to the `cambrian_737k` entry with a sampling
//! rate of 0.5. The table is fixed at compile time and read-only after
//! process start, so concurrent readers need no coordination.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::error::VlprepError;

/// A resolved dataset entry: where its annotations and images live, and what
/// fraction of it to draw during training.
#[derive(Clone, Debug, PartialEq)]
pub struct DatasetConfig {
    pub annotation_path: String,
    pub data_path: String,
    pub sampling_rate: f64,
}

struct DatasetPaths {
    annotation_path: &'static str,
    data_path: &'static str,
}

const PIXMO_POINTING_ABSOLUTE: DatasetPaths = DatasetPaths {
    annotation_path: "PATH_TO_PIXMO_POINTING_ABSOLUTE_ANNOTATION",
    data_path: "PATH_TO_PIXMO_POINTING_DATA",
};

static REGISTRY: Lazy<HashMap<&'static str, DatasetPaths>> = Lazy::new(|| {
    HashMap::from([
        (
            "cambrian_737k",
            DatasetPaths {
                annotation_path: "PATH_TO_CAMBRIAN_737K_ANNOTATION",
                data_path: "",
            },
        ),
        (
            "cambrian_737k_pack",
            DatasetPaths {
                annotation_path: "PATH_TO_CAMBRIAN_737K_ANNOTATION_PACKED",
                data_path: "",
            },
        ),
        (
            "mp_doc",
            DatasetPaths {
                annotation_path: "PATH_TO_MP_DOC_ANNOTATION",
                data_path: "PATH_TO_MP_DOC_DATA",
            },
        ),
        (
            "clevr_mc",
            DatasetPaths {
                annotation_path: "PATH_TO_CLEVR_MC_ANNOTATION",
                data_path: "PATH_TO_CLEVR_MC_DATA",
            },
        ),
        (
            "videochatgpt",
            DatasetPaths {
                annotation_path: "PATH_TO_VIDEOCHATGPT_ANNOTATION",
                data_path: "PATH_TO_VIDEOCHATGPT_DATA",
            },
        ),
        ("pixmo_pointing_absolute", PIXMO_POINTING_ABSOLUTE),
        (
            "pixmo_pointing_relative",
            DatasetPaths {
                annotation_path: "PATH_TO_PIXMO_POINTING_RELATIVE_ANNOTATION",
                data_path: "PATH_TO_PIXMO_POINTING_DATA",
            },
        ),
        // Backward-compatible alias
        ("pixmo_absolute", PIXMO_POINTING_ABSOLUTE),
        (
            "epic100_relative",
            DatasetPaths {
                annotation_path: "PATH_TO_EPIC100_RELATIVE_ANNOTATION",
                data_path: "PATH_TO_OXE_RAW_IMAGES",
            },
        ),
        (
            "epic100_absolute",
            DatasetPaths {
                annotation_path: "PATH_TO_EPIC100_ABSOLUTE_ANNOTATION",
                data_path: "PATH_TO_OXE_RAW_IMAGES",
            },
        ),
        (
            "ego4d_relative",
            DatasetPaths {
                annotation_path: "PATH_TO_EGO4D_RELATIVE_ANNOTATION",
                data_path: "PATH_TO_OXE_RAW_IMAGES",
            },
        ),
        (
            "ego4d_absolute",
            DatasetPaths {
                annotation_path: "PATH_TO_EGO4D_ABSOLUTE_ANNOTATION",
                data_path: "PATH_TO_OXE_RAW_IMAGES",
            },
        ),
        (
            "handal_relative",
            DatasetPaths {
                annotation_path: "PATH_TO_HANDAL_RELATIVE_ANNOTATION",
                data_path: "PATH_TO_OXE_RAW_IMAGES",
            },
        ),
        (
            "handal_absolute",
            DatasetPaths {
                annotation_path: "PATH_TO_HANDAL_ABSOLUTE_ANNOTATION",
                data_path: "PATH_TO_OXE_RAW_IMAGES",
            },
        ),
        (
            "oxe_relative",
            DatasetPaths {
                annotation_path: "PATH_TO_OXE_RELATIVE_ANNOTATION",
                data_path: "PATH_TO_OXE_RAW_IMAGES",
            },
        ),
        (
            "oxe_absolute",
            DatasetPaths {
                annotation_path: "PATH_TO_OXE_ABSOLUTE_ANNOTATION",
                data_path: "PATH_TO_OXE_RAW_IMAGES",
            },
        ),
    ])
});

/// Splits an optional `%N` sampling suffix off a dataset name.
///
/// Returns the bare dataset key and the parsed rate (`N / 100.0`, default
/// 1.0 when no suffix is present). A suffix that is not all digits is not a
/// sampling suffix and is left on the name.
pub fn split_sampling_suffix(name: &str) -> (&str, f64) {
    if let Some((base, suffix)) = name.rsplit_once('%') {
        if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(percent) = suffix.parse::<u32>() {
                return (base, f64::from(percent) / 100.0);
            }
        }
    }
    (name, 1.0)
}

/// Resolves dataset names against the registry.
///
/// # Errors
///
/// Fails with [`VlprepError::UnknownDataset`] on the first name whose key
/// (after stripping any sampling suffix) is not in the table.
pub fn resolve<S: AsRef<str>>(names: &[S]) -> Result<Vec<DatasetConfig>, VlprepError> {
    let mut configs = Vec::with_capacity(names.len());

    for name in names {
        let (key, sampling_rate) = split_sampling_suffix(name.as_ref());
        let paths = REGISTRY
            .get(key)
            .ok_or_else(|| VlprepError::UnknownDataset {
                name: key.to_string(),
            })?;
        configs.push(DatasetConfig {
            annotation_path: paths.annotation_path.to_string(),
            data_path: paths.data_path.to_string(),
            sampling_rate,
        });
    }

    Ok(configs)
}

/// All dataset keys known to the registry, sorted.
pub fn known_datasets() -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = REGISTRY.keys().copied().collect();
    keys.sort_unstable();
    keys
}

/// Fuzz-only entrypoint for dataset name resolution.
#[cfg(feature = "fuzzing")]
pub fn fuzz_resolve(name: &str) {
    let _ = resolve(&[name]);
}
