/*
 * Almagest Toolkit
 * Copyright (C) 2022-onward Almagest contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Truncated VSOP-class series per planet: heliocentric spherical ecliptic
//! coordinates of date. Amplitudes are 1e-8 rad (L, B) and 1e-8 AU (R);
//! arguments are (amplitude, phase, frequency per Julian millennium).
//!
//! The Earth keeps the deepest term set since the geocentric
//! place of everything else rides on it; the other planets keep their
//! leading terms only, which bounds them at the arcminute level.

pub type VsopTerm = (f64, f64, f64);

pub struct VsopSeries {
    /// Powers of tau for the longitude, each a sum of periodic terms
    pub l: [&'static [VsopTerm]; 3],
    pub b: [&'static [VsopTerm]; 3],
    pub r: [&'static [VsopTerm]; 3],
}

pub const EARTH: VsopSeries = VsopSeries {
    l: [
        &[
            (175_347_046.0, 0.0, 0.0),
            (3_341_656.0, 4.669_256_8, 6_283.075_85),
            (34_894.0, 4.6261, 12_566.1517),
            (3_497.0, 2.7441, 5_753.3849),
            (3_418.0, 2.8289, 3.5231),
            (3_136.0, 3.6277, 77_713.7715),
            (2_676.0, 4.4181, 7_860.4194),
            (2_343.0, 6.1352, 3_930.2097),
            (1_324.0, 0.7425, 11_506.7698),
            (1_273.0, 2.0371, 529.691),
            (1_199.0, 1.1096, 1_577.3435),
            (990.0, 5.233, 5_884.927),
            (902.0, 2.045, 26.298),
            (857.0, 3.508, 398.149),
            (780.0, 1.179, 5_223.694),
            (753.0, 2.533, 5_507.553),
            (505.0, 4.583, 18_849.228),
            (492.0, 4.205, 775.523),
            (357.0, 2.92, 0.067),
            (317.0, 5.849, 11_790.629),
            (284.0, 1.899, 796.298),
            (271.0, 0.315, 10_977.079),
            (243.0, 0.345, 5_486.778),
        ],
        &[
            (628_331_966_747.0, 0.0, 0.0),
            (206_059.0, 2.678_235, 6_283.075_85),
            (4_303.0, 2.6351, 12_566.1517),
            (425.0, 1.59, 3.523),
            (119.0, 5.796, 26.298),
            (109.0, 2.966, 1_577.344),
            (93.0, 2.59, 18_849.23),
        ],
        &[
            (52_919.0, 0.0, 0.0),
            (8_720.0, 1.0721, 6_283.0758),
            (309.0, 0.867, 12_566.152),
        ],
    ],
    b: [
        &[
            (280.0, 3.199, 84_334.662),
            (102.0, 5.422, 5_507.553),
            (80.0, 3.88, 5_223.69),
            (44.0, 3.7, 2_352.87),
            (32.0, 4.0, 1_577.34),
        ],
        &[(9.0, 3.9, 5_507.55), (6.0, 1.73, 5_223.69)],
        &[],
    ],
    r: [
        &[
            (100_013_989.0, 0.0, 0.0),
            (1_670_700.0, 3.098_463_5, 6_283.075_85),
            (13_956.0, 3.05525, 12_566.1517),
            (3_084.0, 5.1985, 77_713.7715),
            (1_628.0, 1.1739, 5_753.3849),
            (1_576.0, 2.8469, 7_860.4194),
            (925.0, 5.453, 11_506.77),
            (542.0, 4.564, 3_930.21),
            (472.0, 3.661, 5_884.927),
            (346.0, 0.964, 5_507.553),
            (329.0, 5.9, 5_223.694),
            (307.0, 0.299, 5_573.143),
            (243.0, 4.273, 11_790.629),
            (212.0, 5.847, 1_577.344),
        ],
        &[
            (103_019.0, 1.107_49, 6_283.075_85),
            (1_721.0, 1.0644, 12_566.1517),
            (702.0, 3.142, 0.0),
        ],
        &[(4_359.0, 5.7846, 6_283.0758), (124.0, 5.579, 12_566.152)],
    ],
};

pub const MERCURY: VsopSeries = VsopSeries {
    l: [
        &[
            (440_250_710.0, 0.0, 0.0),
            (40_989_415.0, 1.483_020_34, 26_087.903_141_57),
            (5_046_294.0, 4.477_854_9, 52_175.806_283_1),
            (855_347.0, 1.165_203_2, 78_263.709_424_7),
            (165_590.0, 4.119_692, 104_351.612_566),
            (34_562.0, 0.77931, 130_439.51571),
        ],
        &[
            (2_608_814_706_223.0, 0.0, 0.0),
            (1_126_008.0, 6.217_039_7, 26_087.903_141_6),
            (303_471.0, 3.055_655, 52_175.806_283),
        ],
        &[(53_050.0, 0.0, 0.0), (16_904.0, 4.690_72, 26_087.903_14)],
    ],
    b: [
        &[
            (11_737_529.0, 1.983_574_99, 26_087.903_141_57),
            (2_388_077.0, 5.037_389_6, 52_175.806_283_1),
            (1_222_840.0, 3.141_592_7, 0.0),
            (543_252.0, 1.796_444, 78_263.709_425),
        ],
        &[(429_151.0, 3.501_698, 26_087.903_142)],
        &[],
    ],
    r: [
        &[
            (39_528_272.0, 0.0, 0.0),
            (7_834_132.0, 6.192_337_2, 26_087.903_141_6),
            (795_526.0, 2.959_896_9, 52_175.806_283_1),
            (121_282.0, 6.010_642, 78_263.709_425),
            (21_922.0, 5.802_68, 104_351.612_57),
        ],
        &[
            (217_348.0, 4.656_172, 26_087.903_142),
            (44_142.0, 1.423_86, 52_175.806_283),
        ],
        &[],
    ],
};

pub const VENUS: VsopSeries = VsopSeries {
    l: [
        &[
            (317_614_667.0, 0.0, 0.0),
            (1_353_968.0, 5.593_133_2, 10_213.285_546_2),
            (89_892.0, 5.3065, 20_426.571_09),
            (5_477.0, 4.4163, 7_860.4194),
        ],
        &[
            (1_021_352_943_053.0, 0.0, 0.0),
            (95_708.0, 2.464_24, 10_213.285_55),
            (14_445.0, 0.516_25, 20_426.571_09),
        ],
        &[(54_127.0, 0.0, 0.0), (3_891.0, 0.3451, 10_213.2855)],
    ],
    b: [
        &[
            (5_923_638.0, 0.267_027_8, 10_213.285_546_2),
            (40_108.0, 1.147_37, 20_426.571_09),
            (32_815.0, 3.141_593, 0.0),
        ],
        &[(513_348.0, 1.803_643, 10_213.285_546)],
        &[],
    ],
    r: [
        &[
            (72_334_821.0, 0.0, 0.0),
            (489_824.0, 4.021_518, 10_213.285_546),
            (1_658.0, 4.9021, 20_426.5711),
        ],
        &[(34_551.0, 0.891_99, 10_213.285_55)],
        &[],
    ],
};

pub const MARS: VsopSeries = VsopSeries {
    l: [
        &[
            (620_347_712.0, 0.0, 0.0),
            (18_656_368.0, 5.050_371_00, 3_340.612_426_70),
            (1_108_217.0, 5.400_998_4, 6_681.224_853_4),
            (91_798.0, 5.754_79, 10_021.837_28),
            (27_745.0, 5.9705, 3.523_12),
            (12_316.0, 0.84956, 2_810.92146),
        ],
        &[
            (334_085_627_474.0, 0.0, 0.0),
            (1_458_227.0, 3.604_260_5, 3_340.612_426_7),
            (164_901.0, 3.926_313, 6_681.224_853),
        ],
        &[(58_016.0, 2.049_79, 3_340.612_43), (54_188.0, 0.0, 0.0)],
    ],
    b: [
        &[
            (3_197_135.0, 3.768_320_42, 3_340.612_426_70),
            (298_033.0, 4.106_170, 6_681.224_853),
            (289_105.0, 0.0, 0.0),
            (31_366.0, 4.446_51, 10_021.837_28),
        ],
        &[(350_069.0, 5.368_478, 3_340.612_427)],
        &[],
    ],
    r: [
        &[
            (153_033_488.0, 0.0, 0.0),
            (14_184_953.0, 3.479_712_84, 3_340.612_426_70),
            (660_776.0, 3.817_934_6, 6_681.224_853_4),
            (46_179.0, 4.155_951, 10_021.837_280),
        ],
        &[
            (1_107_433.0, 2.032_505_24, 3_340.612_426_70),
            (103_176.0, 2.370_718, 6_681.224_853),
        ],
        &[(44_242.0, 0.479_31, 3_340.612_43)],
    ],
};

pub const JUPITER: VsopSeries = VsopSeries {
    l: [
        &[
            (59_954_691.0, 0.0, 0.0),
            (9_695_899.0, 5.061_917_9, 529.690_965_1),
            (573_610.0, 1.444_027_0, 7.113_547_0),
            (306_389.0, 5.417_347, 1_059.381_930),
            (97_178.0, 4.142_65, 632.783_74),
            (72_903.0, 3.640_43, 522.577_42),
            (64_264.0, 3.411_45, 103.092_77),
            (39_806.0, 2.293_77, 419.484_64),
        ],
        &[
            (52_993_480_757.0, 0.0, 0.0),
            (489_741.0, 4.220_667, 529.690_965),
            (228_919.0, 6.026_475, 7.113_547),
            (30_135.0, 4.545_58, 1_059.381_93),
        ],
        &[
            (47_234.0, 4.321_48, 7.113_55),
            (38_966.0, 0.0, 0.0),
            (30_629.0, 2.930_21, 529.690_97),
        ],
    ],
    b: [
        &[
            (2_268_616.0, 3.558_526_1, 529.690_965_1),
            (110_090.0, 0.0, 0.0),
            (109_972.0, 3.908_093, 1_059.381_930),
            (8_101.0, 3.6051, 522.5774),
        ],
        &[(78_203.0, 1.523_77, 529.690_97)],
        &[],
    ],
    r: [
        &[
            (520_887_429.0, 0.0, 0.0),
            (25_209_327.0, 3.491_086_40, 529.690_965_09),
            (610_600.0, 3.841_337_0, 1_059.381_930_2),
            (282_029.0, 2.574_199, 632.783_739),
            (187_647.0, 2.075_904, 522.577_418),
            (86_793.0, 0.710_01, 419.484_64),
        ],
        &[
            (1_271_802.0, 2.649_375_12, 529.690_965_09),
            (61_662.0, 3.000_76, 1_059.381_93),
            (53_444.0, 3.897_18, 522.577_42),
        ],
        &[(79_645.0, 1.358_66, 529.690_97)],
    ],
};

pub const SATURN: VsopSeries = VsopSeries {
    l: [
        &[
            (87_401_354.0, 0.0, 0.0),
            (11_107_660.0, 3.962_050_9, 213.299_095_4),
            (1_414_151.0, 4.585_815_2, 7.113_547_0),
            (398_379.0, 0.521_120, 206.185_548),
            (350_769.0, 3.303_299, 426.598_191),
            (206_816.0, 0.246_584, 103.092_774),
            (79_271.0, 3.840_07, 220.412_64),
        ],
        &[
            (21_354_295_596.0, 0.0, 0.0),
            (1_296_855.0, 1.828_205_4, 213.299_095_4),
            (564_348.0, 2.885_001, 7.113_547),
            (107_679.0, 2.277_699, 206.185_548),
            (98_323.0, 1.080_70, 426.598_19),
        ],
        &[
            (116_441.0, 1.179_879, 7.113_547),
            (91_921.0, 0.074_25, 213.299_10),
            (90_592.0, 0.0, 0.0),
        ],
    ],
    b: [
        &[
            (4_330_678.0, 3.602_844_28, 213.299_095_44),
            (240_348.0, 2.852_385, 426.598_191),
            (84_746.0, 0.0, 0.0),
            (30_863.0, 3.484_42, 220.412_64),
        ],
        &[(397_555.0, 5.332_900, 213.299_095)],
        &[],
    ],
    r: [
        &[
            (955_758_136.0, 0.0, 0.0),
            (52_921_382.0, 2.392_262_20, 213.299_095_44),
            (1_873_680.0, 5.235_496_1, 206.185_548_4),
            (1_464_664.0, 1.647_630_5, 426.598_190_9),
            (821_891.0, 5.935_200, 316.391_870),
            (547_507.0, 5.015_326, 103.092_774),
        ],
        &[
            (6_182_981.0, 0.258_435_11, 213.299_095_44),
            (506_578.0, 0.711_147, 206.185_548),
            (341_394.0, 5.796_358, 426.598_191),
        ],
        &[(436_902.0, 4.786_717, 213.299_095)],
    ],
};

pub const URANUS: VsopSeries = VsopSeries {
    l: [
        &[
            (548_129_294.0, 0.0, 0.0),
            (9_260_408.0, 0.891_064_2, 74.781_598_6),
            (1_504_248.0, 3.627_192_6, 1.484_472_7),
            (365_982.0, 1.899_622, 73.297_126),
            (272_328.0, 3.358_237, 149.563_197),
            (70_328.0, 5.392_54, 63.735_90),
        ],
        &[
            (7_502_543_122.0, 0.0, 0.0),
            (154_458.0, 5.242_017, 74.781_599),
            (24_456.0, 1.712_56, 1.484_47),
        ],
        &[(2_806.0, 0.0, 0.0), (2_349.0, 2.267, 74.7816)],
    ],
    b: [
        &[
            (1_346_278.0, 2.618_778_1, 74.781_598_6),
            (62_341.0, 5.081_11, 149.563_20),
            (61_601.0, 3.141_59, 0.0),
            (9_964.0, 1.616_03, 76.266_07),
        ],
        &[(206_366.0, 4.123_943, 74.781_599)],
        &[],
    ],
    r: [
        &[
            (1_921_264_848.0, 0.0, 0.0),
            (88_784_984.0, 5.603_775_27, 74.781_598_57),
            (3_440_836.0, 0.328_361_0, 73.297_125_9),
            (2_055_653.0, 1.782_951_7, 149.563_197_1),
            (649_322.0, 4.522_473, 76.266_071),
        ],
        &[
            (1_479_896.0, 3.672_056_97, 74.781_598_57),
            (71_212.0, 6.226_01, 63.735_90),
            (68_627.0, 6.134_11, 149.563_20),
        ],
        &[],
    ],
};

pub const NEPTUNE: VsopSeries = VsopSeries {
    l: [
        &[
            (531_188_633.0, 0.0, 0.0),
            (1_798_476.0, 2.901_012_7, 38.133_035_6),
            (1_019_728.0, 0.485_809_2, 36.648_562_9),
            (124_532.0, 4.830_081, 36.648_563),
            (42_064.0, 5.410_55, 2.968_95),
        ],
        &[
            (3_837_687_717.0, 0.0, 0.0),
            (16_604.0, 4.863_19, 1.484_47),
            (15_807.0, 2.279_23, 38.133_04),
        ],
        &[],
    ],
    b: [
        &[
            (3_088_623.0, 1.441_043_72, 38.133_035_6),
            (27_780.0, 5.912_72, 76.266_07),
            (27_624.0, 0.0, 0.0),
            (15_448.0, 3.508_77, 39.617_51),
        ],
        &[(227_279.0, 3.807_931, 38.133_036)],
        &[],
    ],
    r: [
        &[
            (3_007_013_206.0, 0.0, 0.0),
            (27_062_259.0, 1.329_994_59, 38.133_035_64),
            (1_691_764.0, 3.251_861_4, 36.648_562_9),
            (807_831.0, 5.185_928, 1.484_472_7),
            (537_761.0, 4.521_139, 35.164_090_2),
        ],
        &[(236_339.0, 0.704_980, 38.133_036), (13_220.0, 3.320_15, 1.484_47)],
        &[],
    ],
};
