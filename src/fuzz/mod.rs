/*
 * SPDX-FileCopyrightText: 2024 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

pub mod table;
