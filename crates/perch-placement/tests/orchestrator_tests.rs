//! Integration tests for the placement orchestrator.

use perch_placement::{
    AutoOr, ClientRect, ContainPolicy, Measurable, Placement, PlacementChoice, PlacementError,
    PlacementResult, PlacementState, RequestedPlacement, StyleRect, Viewport, WindowMetrics,
    resolve_placement,
};

/// A fake element: bounding rect (or detached) plus rendered size.
struct Element {
    rect: Option<ClientRect>,
    offset: (f64, f64),
}

impl Measurable for Element {
    fn bounding_client_rect(&self) -> Option<ClientRect> {
        self.rect
    }

    fn offset_size(&self) -> (f64, f64) {
        self.offset
    }
}

/// A window whose `innerWidth`/`innerHeight` are not available.
struct ClientOnlyWindow;

impl WindowMetrics for ClientOnlyWindow {
    fn inner_width(&self) -> f64 {
        0.0
    }
    fn inner_height(&self) -> f64 {
        0.0
    }
    fn client_width(&self) -> f64 {
        1000.0
    }
    fn client_height(&self) -> f64 {
        800.0
    }
}

const VIEWPORT: Viewport = Viewport {
    width: 1000.0,
    height: 800.0,
};

fn trigger() -> Element {
    Element {
        rect: Some(ClientRect::from_edges(5.0, 55.0, 35.0, 5.0)),
        offset: (50.0, 30.0),
    }
}

/// The bounding rect is smaller than the rendered size: the engine must use
/// the rendered 200x100.
fn popover() -> Element {
    Element {
        rect: Some(ClientRect::from_origin_size(0.0, 0.0, 180.0, 90.0)),
        offset: (200.0, 100.0),
    }
}

fn run(
    requested: &RequestedPlacement,
    policy: &ContainPolicy,
) -> Result<Option<PlacementState>, PlacementError> {
    resolve_placement(
        requested,
        Some(&trigger()),
        Some(&popover()),
        policy,
        &VIEWPORT,
    )
}

#[test]
fn test_missing_elements_are_a_no_op() {
    let requested = RequestedPlacement::from(Placement::Top);
    let detached = Element {
        rect: None,
        offset: (0.0, 0.0),
    };

    let state = resolve_placement(
        &requested,
        None,
        Some(&popover()),
        &ContainPolicy::Flip,
        &VIEWPORT,
    );
    assert!(matches!(state, Ok(None)));

    let state = resolve_placement(
        &requested,
        Some(&trigger()),
        Some(&detached),
        &ContainPolicy::Flip,
        &VIEWPORT,
    );
    assert!(matches!(state, Ok(None)));
}

#[test]
fn test_named_placement_is_case_insensitive_and_flipped() {
    let requested = RequestedPlacement::from("TOP");
    let state = run(&requested, &ContainPolicy::FlipY).unwrap().unwrap();

    assert_eq!(state.result.placement, Placement::Bottom);
    assert_eq!(state.result.style.top, AutoOr::Length(35.0));
    assert_eq!(state.result.style.bottom, AutoOr::Auto);
    assert!(state.requested.same_as(&requested));
}

#[test]
fn test_offset_size_overrides_bounding_size() {
    // With the 180-wide bounding rect, centering would give right = 880.
    let state = run(&RequestedPlacement::from("top"), &ContainPolicy::None)
        .unwrap()
        .unwrap();
    assert_eq!(state.result.style.right, AutoOr::Length(870.0));
}

#[test]
fn test_unknown_name_resolves_to_center() {
    let state = run(
        &RequestedPlacement::from("not-a-real-placement"),
        &ContainPolicy::Flip,
    )
    .unwrap()
    .unwrap();

    assert_eq!(state.result.placement, Placement::Center);
    assert_eq!(
        state.result.style,
        StyleRect {
            top: AutoOr::Auto,
            right: AutoOr::Length(870.0),
            bottom: AutoOr::Length(730.0),
            left: AutoOr::Auto,
        }
    );
}

#[test]
fn test_callback_name_goes_through_correction() {
    let requested = RequestedPlacement::callback(|trigger, popover, policy| {
        assert_eq!(popover.width, 200.0);
        assert_eq!(trigger.bottom, 35.0);
        assert!(matches!(policy, ContainPolicy::Flip));
        PlacementChoice::from("Top")
    });

    let state = run(&requested, &ContainPolicy::Flip).unwrap().unwrap();
    assert_eq!(state.result.placement, Placement::BottomLeft);
    assert!(state.requested.same_as(&requested));
}

#[test]
fn test_callback_result_skips_correction() {
    let fixed = PlacementResult {
        placement: Placement::Top,
        style: StyleRect {
            top: AutoOr::Auto,
            right: AutoOr::Auto,
            bottom: AutoOr::Length(795.0),
            left: AutoOr::Length(5.0),
        },
    };
    let requested = RequestedPlacement::callback(move |_, _, _| PlacementChoice::Resolved(fixed));

    // `top` overflows, yet the callback's answer is used verbatim.
    let state = run(&requested, &ContainPolicy::Flip).unwrap().unwrap();
    assert_eq!(state.result, fixed);
}

#[test]
fn test_malformed_callback_result_is_a_configuration_error() {
    let requested = RequestedPlacement::callback(|_, _, _| {
        PlacementChoice::Resolved(PlacementResult {
            placement: Placement::Top,
            style: StyleRect::uniform(0.0),
        })
    });

    let error = run(&requested, &ContainPolicy::Flip).unwrap_err();
    assert!(matches!(
        error,
        PlacementError::InvalidCallbackResult {
            placement: Placement::Top,
            ..
        }
    ));
    assert!(error.to_string().contains("[Popover]"));
}

#[test]
fn test_window_falls_back_to_client_size() {
    let requested = RequestedPlacement::from("top");
    let from_client = resolve_placement(
        &requested,
        Some(&trigger()),
        Some(&popover()),
        &ContainPolicy::Flip,
        &ClientOnlyWindow,
    )
    .unwrap()
    .unwrap();
    let from_viewport = run(&requested, &ContainPolicy::Flip).unwrap().unwrap();

    assert_eq!(from_client.result, from_viewport.result);
}

#[test]
fn test_repeated_calls_are_bit_identical() {
    let requested = RequestedPlacement::from("innerBottomRight");
    let first = run(&requested, &ContainPolicy::Flip).unwrap().unwrap();
    let second = run(&requested, &ContainPolicy::Flip).unwrap().unwrap();

    let bits = |style: StyleRect| {
        [style.top, style.right, style.bottom, style.left]
            .map(|offset| offset.length().map(f64::to_bits))
    };
    assert_eq!(bits(first.result.style), bits(second.result.style));
}

#[test]
fn test_placement_result_json_shape() {
    let state = run(&RequestedPlacement::from("bottom"), &ContainPolicy::None)
        .unwrap()
        .unwrap();
    let json = serde_json::to_value(state.result).unwrap();

    assert_eq!(json["placement"], "bottom");
    assert_eq!(json["style"]["top"], 35.0);
    assert_eq!(json["style"]["bottom"], "auto");

    let back: PlacementResult = serde_json::from_value(json).unwrap();
    assert_eq!(back, state.result);
}
